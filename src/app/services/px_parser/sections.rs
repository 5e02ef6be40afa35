//! Metadata/data sectioning of PX documents
//!
//! A PX document is a run of `NAME=VALUES;` statements followed by a final
//! `DATA=` statement whose value runs to the end of the document.

use super::splitter::{Split, Tail, split};
use crate::constants::{DATA_MARKER, STATEMENT_SEPARATOR};
use crate::{Error, Result};
use tracing::{debug, warn};

/// A PX document split into metadata statements and the raw data block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    /// Metadata statements, each of the form `NAME=VALUES`
    pub attributes: Vec<String>,

    /// Data block without separators, trimmed
    pub data: String,
}

impl Sections {
    /// Whitespace-separated data tokens in serialization order
    pub fn tokens(&self) -> Vec<&str> {
        self.data.split_whitespace().collect()
    }
}

/// Split raw document text into metadata statements and data
pub fn extract(raw: &str) -> Result<Sections> {
    let text = raw.replace(['\n', '\r'], " ");

    let (metadata, data) = text.split_once(DATA_MARKER).ok_or_else(|| {
        Error::format(format!("No '{}' marker found in PX document", DATA_MARKER))
    })?;

    let statements = match split(metadata, STATEMENT_SEPARATOR, Tail::Terminated) {
        Split::Parts(parts) => parts,
        Split::Unsplit(only) if only.trim().is_empty() => Vec::new(),
        Split::Unsplit(only) => {
            warn!("Metadata section has no statement terminator; treating it as one statement");
            vec![only]
        }
    };

    let attributes: Vec<String> = statements
        .into_iter()
        .map(|statement| statement.trim().trim_end_matches(STATEMENT_SEPARATOR).to_string())
        .filter(|statement| !statement.is_empty())
        .collect();

    let data = data.replace(STATEMENT_SEPARATOR, "").trim().to_string();

    debug!(
        "Sectioned PX document: {} metadata statements, {} bytes of data",
        attributes.len(),
        data.len()
    );

    Ok(Sections { attributes, data })
}
