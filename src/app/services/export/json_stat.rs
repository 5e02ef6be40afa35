//! JSON-Stat 2.0 projection of a parsed document
//!
//! Dimensions keep STUB-then-HEADING order and a trailing single-category
//! `Variables` dimension carries the `DATA` metric. Category ids are the
//! member codes when `CODES(name)` is present, labels otherwise, and
//! positions when neither is distinct.

use crate::app::models::{DataValue, Dimension, MetadataValue, ParsedPx};
use crate::app::services::px_parser::text::unique;
use crate::constants::{DATA_COLUMN, JSON_STAT_METRIC_DIMENSION, JSON_STAT_VERSION, keywords};
use serde_json::{Map, Value, json};
use tracing::warn;

/// Build a JSON-Stat dataset object for `parsed`
pub fn to_json_stat(parsed: &ParsedPx) -> Value {
    let mut ids: Vec<String> = parsed.dimensions.iter().map(|d| d.name.clone()).collect();
    ids.push(JSON_STAT_METRIC_DIMENSION.to_string());

    let mut sizes: Vec<usize> = parsed.dimensions.iter().map(Dimension::len).collect();
    sizes.push(1);

    let mut dimensions = Map::new();
    for dimension in &parsed.dimensions {
        dimensions.insert(dimension.name.clone(), dimension_object(dimension));
    }
    dimensions.insert(
        JSON_STAT_METRIC_DIMENSION.to_string(),
        metric_dimension(parsed),
    );

    let values: Vec<Value> = parsed.table.values().map(cell).collect();

    let mut dataset = Map::new();
    dataset.insert("version".into(), json!(JSON_STAT_VERSION));
    dataset.insert("class".into(), json!("dataset"));
    if let Some(title) = parsed.title() {
        dataset.insert("label".into(), json!(title));
    }
    if let Some(note) = parsed.metadata.get(keywords::NOTE) {
        dataset.insert("note".into(), json!(note.to_members()));
    }
    if let Some(source) = parsed.metadata.get(keywords::SOURCE) {
        dataset.insert("source".into(), json!(source.joined(" ")));
    }
    dataset.insert("id".into(), json!(ids));
    dataset.insert("size".into(), json!(sizes));
    dataset.insert("dimension".into(), Value::Object(dimensions));
    dataset.insert(
        "role".into(),
        json!({ "metric": [JSON_STAT_METRIC_DIMENSION] }),
    );
    dataset.insert("value".into(), Value::Array(values));

    Value::Object(dataset)
}

fn dimension_object(dimension: &Dimension) -> Value {
    let ids = category_ids(dimension);

    let mut index = Map::new();
    let mut label = Map::new();
    for (position, (id, member)) in ids.iter().zip(&dimension.members).enumerate() {
        index.insert(id.clone(), json!(position));
        label.insert(id.clone(), json!(member));
    }

    json!({
        "label": dimension.name,
        "category": {
            "index": index,
            "label": label,
        }
    })
}

/// Codes, then labels, then positions: the first candidate with one distinct
/// id per member
fn category_ids(dimension: &Dimension) -> Vec<String> {
    if let Some(codes) = &dimension.codes {
        if codes.len() == dimension.len() && is_distinct(codes) {
            return codes.clone();
        }
        warn!(
            "Ignoring codes of dimension '{}' for JSON-Stat ids: {} codes for {} members or duplicates",
            dimension.name,
            codes.len(),
            dimension.len()
        );
    }

    if is_distinct(&dimension.members) {
        return dimension.members.clone();
    }

    warn!(
        "Dimension '{}' has duplicate labels, using positional JSON-Stat ids",
        dimension.name
    );
    (0..dimension.len()).map(|position| position.to_string()).collect()
}

fn is_distinct(ids: &[String]) -> bool {
    unique(ids).len() == ids.len()
}

fn metric_dimension(parsed: &ParsedPx) -> Value {
    let mut category = Map::new();
    category.insert("index".into(), json!({ DATA_COLUMN: 0 }));
    category.insert("label".into(), json!({ DATA_COLUMN: DATA_COLUMN }));

    let decimals = parsed
        .metadata
        .get(keywords::DECIMALS)
        .and_then(MetadataValue::first)
        .and_then(|value| value.trim().parse::<u32>().ok());
    let units = parsed
        .metadata
        .get(keywords::UNITS)
        .map(|value| value.joined(" "));

    if decimals.is_some() || units.is_some() {
        let mut unit = Map::new();
        if let Some(decimals) = decimals {
            unit.insert("decimals".into(), json!(decimals));
        }
        if let Some(units) = units {
            unit.insert("label".into(), json!(units));
        }
        category.insert("unit".into(), json!({ DATA_COLUMN: unit }));
    }

    json!({
        "label": JSON_STAT_METRIC_DIMENSION,
        "category": category,
    })
}

/// Numbers stay numeric, missing and disclosed cells become null
fn cell(value: &DataValue) -> Value {
    match value {
        DataValue::Raw(raw) => match value.as_f64() {
            Some(number) => json!(number),
            None => json!(raw),
        },
        DataValue::Missing | DataValue::NotANumber => Value::Null,
    }
}
