//! Dimension extraction from STUB/HEADING declarations

use crate::app::models::{Dimension, MetadataDictionary};
use crate::constants::keywords;
use crate::{Error, Result};
use tracing::{debug, warn};

/// Dimension names in STUB-then-HEADING order; absent keys contribute nothing
pub fn dimension_names(metadata: &MetadataDictionary) -> Vec<String> {
    [keywords::STUB, keywords::HEADING]
        .iter()
        .filter_map(|key| metadata.get(key))
        .flat_map(|value| value.to_members())
        .collect()
}

/// Read dimension names and their `VALUES(name)` members
pub fn get_dimensions(metadata: &MetadataDictionary) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let names = dimension_names(metadata);
    let mut members = Vec::with_capacity(names.len());

    for name in &names {
        let key = keywords::dimension_key(keywords::VALUES, name);
        let values = metadata
            .get(&key)
            .ok_or_else(|| Error::missing_dimension(name, &key))?;
        members.push(values.to_members());
    }

    debug!("Extracted {} dimensions: {:?}", names.len(), names);
    Ok((names, members))
}

/// Read `CODES(name)` for the dimensions that declare one
pub fn get_codes(metadata: &MetadataDictionary) -> (Vec<String>, Vec<Vec<String>>) {
    dimension_names(metadata)
        .into_iter()
        .filter_map(|name| {
            let key = keywords::dimension_key(keywords::CODES, &name);
            metadata.get(&key).map(|codes| (name, codes.to_members()))
        })
        .unzip()
}

/// Dimensions with members and, where declared, codes
pub fn dimensions(metadata: &MetadataDictionary) -> Result<Vec<Dimension>> {
    let (names, members) = get_dimensions(metadata)?;
    let (coded_names, code_lists) = get_codes(metadata);

    let dimensions = names
        .into_iter()
        .zip(members)
        .map(|(name, members)| {
            let codes = coded_names
                .iter()
                .position(|coded| *coded == name)
                .map(|index| code_lists[index].clone());
            if let Some(codes) = &codes {
                if codes.len() != members.len() {
                    warn!(
                        "Dimension '{}' has {} members but {} codes",
                        name,
                        members.len(),
                        codes.len()
                    );
                }
            }
            let dimension = Dimension::new(name, members);
            match codes {
                Some(codes) => dimension.with_codes(codes),
                None => dimension,
            }
        })
        .collect();

    Ok(dimensions)
}
