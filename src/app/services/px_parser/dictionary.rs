//! Metadata dictionary construction from `NAME=VALUES` statements

use super::splitter::{Split, Tail, split};
use super::text::quoted_segments;
use crate::app::models::{MetadataDictionary, MetadataValue};
use crate::constants::{ASSIGNMENT_SEPARATOR, QUOTE};
use crate::{Error, Result};
use tracing::debug;

/// Build an ordered dictionary from metadata statements
///
/// Later statements with the same normalized name overwrite earlier ones.
pub fn build<S: AsRef<str>>(statements: &[S]) -> Result<MetadataDictionary> {
    let mut dictionary = MetadataDictionary::new();

    for statement in statements {
        let (name, value) = parse_statement(statement.as_ref())?;
        if let Some(previous) = dictionary.insert(name.clone(), value) {
            debug!("Duplicate attribute '{}' overwrites {:?}", name, previous);
        }
    }

    Ok(dictionary)
}

/// Parse one `NAME=VALUES` statement into a normalized name and its value
pub fn parse_statement(statement: &str) -> Result<(String, MetadataValue)> {
    let parts = match split(statement, ASSIGNMENT_SEPARATOR, Tail::Separated) {
        Split::Parts(parts) => parts,
        Split::Unsplit(_) => {
            return Err(Error::format(format!(
                "Statement has no unquoted '{}': {}",
                ASSIGNMENT_SEPARATOR, statement
            )));
        }
    };

    let [name, values] = parts.as_slice() else {
        return Err(Error::format(format!(
            "Statement must contain exactly one unquoted '{}': {}",
            ASSIGNMENT_SEPARATOR, statement
        )));
    };

    Ok((normalize_name(name), parse_value(values)))
}

/// Normalize an attribute name so `VALUES( "x" )` and `VALUES(x)` coincide
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .replace(QUOTE, "")
        .replace("( ", "(")
        .replace(" )", ")")
}

/// Decide scalar vs. list for a raw value
pub fn parse_value(raw: &str) -> MetadataValue {
    if raw.contains(QUOTE) {
        MetadataValue::List(quoted_segments(raw))
    } else {
        MetadataValue::Scalar(raw.trim().to_string())
    }
}
