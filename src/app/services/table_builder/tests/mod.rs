//! Test utilities for dimension extraction and table building

use crate::app::models::{MetadataDictionary, MetadataValue};


/// Member lists from string slices
pub fn members(lists: &[&[&str]]) -> Vec<Vec<String>> {
    lists
        .iter()
        .map(|list| list.iter().map(|member| member.to_string()).collect())
        .collect()
}

/// Dimension names from string slices
pub fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Metadata with STUB="region", HEADING="year","quarter" and their values
pub fn create_metadata() -> MetadataDictionary {
    [
        ("STUB", MetadataValue::list(["region"])),
        ("HEADING", MetadataValue::list(["year", "quarter"])),
        ("VALUES(region)", MetadataValue::list(["North", "South", "East"])),
        ("VALUES(year)", MetadataValue::list(["2023", "2024"])),
        ("VALUES(quarter)", MetadataValue::list(["Q1", "Q2", "Q3", "Q4"])),
        ("CODES(region)", MetadataValue::list(["N", "S", "E"])),
    ]
    .into_iter()
    .collect()
}
