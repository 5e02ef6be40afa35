//! Tests for metadata dictionary construction

use super::*;
use crate::Error;
use crate::app::models::MetadataValue;
use crate::app::services::px_parser::dictionary::{build, normalize_name, parse_statement, parse_value};
use crate::app::services::px_parser::sections::extract;

#[test]
fn test_build_simple_dictionary() {
    let sections = extract(&create_simple_px()).unwrap();
    let dictionary = build(&sections.attributes).unwrap();

    assert_eq!(
        dictionary.keys().collect::<Vec<_>>(),
        vec!["CHARSET", "TITLE", "STUB", "HEADING", "VALUES(A)", "VALUES(B)"]
    );
    assert_eq!(
        dictionary.get("VALUES(A)"),
        Some(&MetadataValue::list(["x", "y"]))
    );
    assert_eq!(dictionary.get_list("TITLE"), Some(&["Simple table".to_string()][..]));
}

#[test]
fn test_unquoted_value_is_scalar() {
    let sections = extract(&create_census_px()).unwrap();
    let dictionary = build(&sections.attributes).unwrap();

    assert_eq!(dictionary.get_scalar("DECIMALS"), Some("0"));
    assert_eq!(
        dictionary.get("AXIS-VERSION"),
        Some(&MetadataValue::list(["2010"]))
    );
}

#[test]
fn test_multiline_value_keeps_every_segment() {
    let sections = extract(&create_census_px()).unwrap();
    let dictionary = build(&sections.attributes).unwrap();

    assert_eq!(
        dictionary.get("TITLE"),
        Some(&MetadataValue::list([
            "Resident population by sex, age",
            "and year"
        ]))
    );
}

#[test]
fn test_duplicate_attribute_last_wins() {
    let dictionary = build(&[r#"TITLE="first""#, r#"STUB="A""#, r#"TITLE="second""#]).unwrap();

    assert_eq!(dictionary.len(), 2);
    assert_eq!(dictionary.get_list("TITLE"), Some(&["second".to_string()][..]));
    // position of the first occurrence is kept
    assert_eq!(dictionary.position("TITLE"), Some(0));
}

#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name(r#" VALUES( "age group" ) "#), "VALUES(age group)");
    assert_eq!(normalize_name(r#"CODES("sex")"#), "CODES(sex)");
    assert_eq!(normalize_name("TITLE[fr]"), "TITLE[fr]");
}

#[test]
fn test_parse_statement_with_equals_inside_quotes() {
    let (name, value) = parse_statement(r#"NOTE="a=b""#).unwrap();
    assert_eq!(name, "NOTE");
    assert_eq!(value, MetadataValue::list(["a=b"]));
}

#[test]
fn test_parse_statement_without_assignment() {
    let result = parse_statement(r#"JUSTANAME"#);
    assert!(matches!(result, Err(Error::Format { .. })));
}

#[test]
fn test_parse_statement_with_two_assignments() {
    let result = parse_statement(r#"A=1=2"#);
    assert!(matches!(result, Err(Error::Format { .. })));
}

#[test]
fn test_parse_value_preserves_empty_strings() {
    assert_eq!(parse_value(r#""","x""#), MetadataValue::list(["", "x"]));
    assert_eq!(parse_value(" YES "), MetadataValue::scalar("YES"));
}
