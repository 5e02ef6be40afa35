//! Tests for metadata/data sectioning

use super::*;
use crate::Error;
use crate::app::services::px_parser::sections::extract;

#[test]
fn test_extract_simple_document() {
    let sections = extract(&create_simple_px()).unwrap();

    assert_eq!(
        sections.attributes,
        vec![
            r#"CHARSET="ANSI""#,
            r#"TITLE="Simple table""#,
            r#"STUB="A""#,
            r#"HEADING="B""#,
            r#"VALUES("A")="x","y""#,
            r#"VALUES("B")="p","q""#,
        ]
    );
    assert_eq!(sections.tokens(), vec!["1", "2", "3", "4"]);
}

#[test]
fn test_extract_joins_continuation_lines() {
    let sections = extract(&create_census_px()).unwrap();

    let title = sections
        .attributes
        .iter()
        .find(|statement| statement.starts_with("TITLE"))
        .unwrap();
    assert!(title.starts_with(r#"TITLE="Resident population by sex, age","#));
    assert!(title.ends_with(r#""and year""#));
    assert_eq!(sections.tokens().len(), 12);
}

#[test]
fn test_extract_keeps_semicolon_inside_quotes() {
    let sections = extract(r#"NOTE="a; b";STUB="A";DATA=1;"#).unwrap();
    assert_eq!(sections.attributes[0], r#"NOTE="a; b""#);
}

#[test]
fn test_extract_missing_data_marker() {
    let result = extract(r#"TITLE="No data";STUB="A";"#);
    assert!(matches!(result, Err(Error::Format { .. })));
}

#[test]
fn test_extract_empty_data_block() {
    let sections = extract(r#"TITLE="Empty";DATA=;"#).unwrap();
    assert!(sections.data.is_empty());
    assert!(sections.tokens().is_empty());
}
