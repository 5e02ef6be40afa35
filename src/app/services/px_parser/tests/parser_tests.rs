//! Tests for the main PX parser functionality

use super::*;
use crate::Error;
use crate::app::models::DataValue;
use crate::app::services::fetcher::FileSource;
use crate::app::services::px_parser::PxParser;
use crate::config::ParsingConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn row(px: &crate::ParsedPx, index: usize) -> (Vec<&str>, &DataValue) {
    let row = &px.table.rows[index];
    (
        row.members.iter().map(String::as_str).collect(),
        &row.value,
    )
}

#[test]
fn test_parse_two_by_two_table() {
    let px = PxParser::default().parse_str(&create_simple_px()).unwrap();

    assert_eq!(px.table.dimension_names, vec!["A", "B"]);
    assert_eq!(px.table.len(), 4);

    let expected = [
        (vec!["x", "p"], "1"),
        (vec!["x", "q"], "2"),
        (vec!["y", "p"], "3"),
        (vec!["y", "q"], "4"),
    ];
    for (index, (members, value)) in expected.iter().enumerate() {
        let (actual_members, actual_value) = row(&px, index);
        assert_eq!(&actual_members, members);
        assert_eq!(actual_value, &DataValue::Raw(value.to_string()));
    }
}

#[test]
fn test_row_count_is_product_of_member_counts() {
    let px = PxParser::default().parse_str(&create_census_px()).unwrap();

    let product: usize = px.dimensions.iter().map(|d| d.len()).product();
    assert_eq!(product, 12);
    assert_eq!(px.table.len(), product);
    assert_eq!(px.table.dimension_names, vec!["sex", "age group", "year"]);
}

#[test]
fn test_recoding_of_special_tokens() {
    let px = PxParser::default().parse_str(&create_census_px()).unwrap();

    // ".." sits at (Men, 65+, 2020), "." at (Women, 15-64, 2020)
    assert_eq!(row(&px, 4).0, vec!["Men", "65+", "2020"]);
    assert_eq!(row(&px, 4).1, &DataValue::NotANumber);
    assert_eq!(row(&px, 8).0, vec!["Women", "15-64", "2020"]);
    assert_eq!(row(&px, 8).1, &DataValue::Missing);
    assert_eq!(row(&px, 11).1.as_f64(), Some(311.0));
}

#[test]
fn test_custom_recoding_patterns() {
    let options = ParsingConfig {
        null_pattern: r#"^"-"$"#.to_string(),
        ..ParsingConfig::default()
    };
    let parser = PxParser::new(&options).unwrap();
    let px = parser
        .parse_str(r#"STUB="A";VALUES("A")="x","y";DATA="-" ".";"#)
        .unwrap();

    assert_eq!(px.table.rows[0].value, DataValue::Missing);
    assert_eq!(px.table.rows[1].value, DataValue::Raw(r#"".""#.to_string()));
}

#[test]
fn test_invalid_recoding_pattern() {
    let options = ParsingConfig {
        sd_pattern: "([".to_string(),
        ..ParsingConfig::default()
    };
    assert!(matches!(
        PxParser::new(&options),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_codes_attached_to_dimensions() {
    let px = PxParser::default().parse_str(&create_census_px()).unwrap();

    let sex = &px.dimensions[0];
    assert_eq!(sex.codes, Some(vec!["1".to_string(), "2".to_string()]));
    assert_eq!(sex.code_or_label(1), Some("2"));
    assert_eq!(px.dimensions[1].codes, None);
    assert_eq!(px.dimensions[1].code_or_label(2), Some("65+"));
}

#[test]
fn test_monolingual_metadata_passthrough() {
    let px = PxParser::default().parse_str(&create_simple_px()).unwrap();

    assert!(!px.is_multilingual());
    assert!(px.translation_map().is_empty());
    assert_eq!(px.metadata.len(), 6);
    assert_eq!(px.title().as_deref(), Some("Simple table"));
}

#[test]
fn test_misaligned_data_is_an_error() {
    let result = PxParser::default().parse_str(&create_misaligned_px());
    match result {
        Err(Error::MisalignedData { expected, found }) => {
            assert_eq!(expected, 4);
            assert_eq!(found, 3);
        }
        other => panic!("Expected misaligned data error, got {:?}", other),
    }
}

#[test]
fn test_overflowing_dimension_product_is_misaligned() {
    let names: Vec<String> = (0..20).map(|i| format!("\"D{}\"", i)).collect();
    let mut text = format!("STUB={};\n", names.join(","));
    for i in 0..20 {
        text.push_str(&format!(
            "VALUES(\"D{}\")=\"0\",\"1\",\"2\",\"3\",\"4\",\"5\",\"6\",\"7\",\"8\",\"9\";\n",
            i
        ));
    }
    text.push_str("DATA=1 2 3;");

    let result = PxParser::default().parse_str(&text);
    assert!(matches!(
        result,
        Err(Error::MisalignedData {
            expected: usize::MAX,
            found: 3
        })
    ));
}

#[test]
fn test_missing_values_for_dimension() {
    let result = PxParser::default().parse_str(r#"STUB="A","B";VALUES("A")="x";DATA=1;"#);
    match result {
        Err(Error::MissingDimension { dimension, key }) => {
            assert_eq!(dimension, "B");
            assert_eq!(key, "VALUES(B)");
        }
        other => panic!("Expected missing dimension error, got {:?}", other),
    }
}

#[test]
fn test_document_without_dimensions() {
    let px = PxParser::default().parse_str(r#"TITLE="Total";DATA=42;"#).unwrap();

    assert!(px.dimensions.is_empty());
    assert_eq!(px.table.len(), 1);
    assert!(px.table.rows[0].members.is_empty());
    assert_eq!(px.table.rows[0].value.as_f64(), Some(42.0));
}

#[test]
fn test_parse_detailed_statistics() {
    let result = PxParser::default()
        .parse_detailed(&create_census_px())
        .unwrap();

    assert_eq!(result.stats.statements, 10);
    assert_eq!(result.stats.duplicate_statements, 0);
    assert_eq!(result.stats.dimensions, 3);
    assert_eq!(result.stats.rows, 12);
    assert_eq!(result.stats.missing_values, 1);
    assert_eq!(result.stats.disclosed_values, 1);
    assert_eq!(result.stats.languages, 0);
    assert!((result.stats.fill_rate() - 10.0 / 12.0 * 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_parse_uri_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", create_simple_px()).unwrap();

    let source = FileSource::new("utf-8");
    let result = PxParser::default()
        .parse_uri(&source, file.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(result.px.table.len(), 4);
    assert_eq!(result.stats.statements, 6);
}
