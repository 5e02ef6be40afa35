//! Data models for PX processing
//!
//! This module contains the core data structures produced by a parse: the
//! ordered metadata dictionary, dimensions, the multilingual view and the
//! flattened data table.

use crate::constants::keywords;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// Metadata Values
// =============================================================================

/// Value of a single metadata attribute
///
/// Decided once per attribute when the dictionary is built: raw text with no
/// quotation marks becomes a scalar (numbers, bare keywords like `YES`),
/// anything quoted becomes a list of the quoted strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Unquoted raw value
    Scalar(String),
    /// Quoted strings in source order
    List(Vec<String>),
}

impl MetadataValue {
    /// Build a list value from anything yielding strings
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a scalar value
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// View the value as a sequence of strings; a scalar is a single member
    pub fn to_members(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Scalar(value) => vec![value.clone()],
        }
    }

    /// First element of a list, or the scalar itself
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::List(items) => items.first().map(String::as_str),
            Self::Scalar(value) => Some(value),
        }
    }

    /// Render the value joined into one string
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Self::List(items) => items.join(separator),
            Self::Scalar(value) => value.clone(),
        }
    }
}

// =============================================================================
// Metadata Dictionary
// =============================================================================

/// Ordered mapping of attribute names to values
///
/// Iteration order is file order. Inserting an existing name overwrites the
/// value and keeps the position of the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataDictionary {
    entries: IndexMap<String, MetadataValue>,
}

impl MetadataDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an attribute, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: MetadataValue) -> Option<MetadataValue> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&MetadataValue> {
        self.entries.get(name)
    }

    /// List value of an attribute; `None` when absent or scalar
    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(MetadataValue::as_list)
    }

    /// Scalar value of an attribute; `None` when absent or a list
    pub fn get_scalar(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(MetadataValue::as_scalar)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove an attribute, keeping the order of the remaining entries
    pub fn remove(&mut self, name: &str) -> Option<MetadataValue> {
        self.entries.shift_remove(name)
    }

    /// Position of an attribute in file order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(name)
    }

    /// Attribute at a position in file order
    pub fn get_index(&self, index: usize) -> Option<(&str, &MetadataValue)> {
        self.entries
            .get_index(index)
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, MetadataValue)> for MetadataDictionary {
    fn from_iter<T: IntoIterator<Item = (K, MetadataValue)>>(iter: T) -> Self {
        let mut dictionary = Self::new();
        for (name, value) in iter {
            dictionary.insert(name, value);
        }
        dictionary
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// A table dimension declared in STUB or HEADING
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension name as written in STUB/HEADING
    pub name: String,

    /// Member labels from `VALUES(name)`
    pub members: Vec<String>,

    /// Member codes from `CODES(name)` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<String>>,
}

impl Dimension {
    pub fn new(name: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            name: name.into(),
            members,
            codes: None,
        }
    }

    pub fn with_codes(mut self, codes: Vec<String>) -> Self {
        self.codes = Some(codes);
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Code for the member at `index`, falling back to the label
    pub fn code_or_label(&self, index: usize) -> Option<&str> {
        self.codes
            .as_ref()
            .and_then(|codes| codes.get(index))
            .or_else(|| self.members.get(index))
            .map(String::as_str)
    }
}

// =============================================================================
// Multilingual Metadata
// =============================================================================

/// Translations of one field: language tag -> value in that language
pub type FieldTranslations = IndexMap<String, MetadataValue>;

/// Translation map: bracket-stripped field name -> translations
pub type TranslationMap = IndexMap<String, FieldTranslations>;

/// Result of resolving a multilingual file to one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultilingualMetadata {
    /// Languages declared in LANGUAGES, in file order
    pub languages: Vec<String>,

    /// First element of LANGUAGE
    pub default_language: String,

    /// Language the view was resolved for
    pub requested_language: String,

    /// Metadata as seen in the requested language
    pub view: MetadataDictionary,

    /// Per-field translations across all languages
    pub translation_map: TranslationMap,
}

impl MultilingualMetadata {
    /// Translation of a field into one language
    pub fn translate(&self, field: &str, language: &str) -> Option<&MetadataValue> {
        self.translation_map
            .get(field)
            .and_then(|translations| translations.get(language))
    }
}

// =============================================================================
// Data Table
// =============================================================================

/// A recoded data cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataValue {
    /// Token kept as written
    Raw(String),
    /// Token matched the null pattern
    Missing,
    /// Token matched the statistical disclosure pattern
    NotANumber,
}

impl DataValue {
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Self::NotANumber)
    }

    /// Numeric interpretation; missing, disclosed and non-numeric cells are `None`
    pub fn as_f64(&self) -> Option<f64> {
        self.as_raw()
            .and_then(|value| value.trim_matches('"').parse::<f64>().ok())
    }
}

/// One row of the flattened table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRow {
    /// One member per dimension, STUB then HEADING
    pub members: Vec<String>,
    pub value: DataValue,
}

/// Cartesian product of dimension members aligned with the DATA block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    pub dimension_names: Vec<String>,
    pub rows: Vec<DataRow>,
}

impl DataTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Members of one dimension column, row by row
    pub fn column(&self, dimension: &str) -> Option<Vec<&str>> {
        let index = self
            .dimension_names
            .iter()
            .position(|name| name == dimension)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.members[index].as_str())
                .collect(),
        )
    }

    pub fn values(&self) -> impl Iterator<Item = &DataValue> {
        self.rows.iter().map(|row| &row.value)
    }
}

// =============================================================================
// Parse Result
// =============================================================================

/// Everything produced by parsing one PX document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedPx {
    /// Raw dictionary for monolingual files, language view otherwise
    pub metadata: MetadataDictionary,

    /// Dimensions in STUB-then-HEADING order
    pub dimensions: Vec<Dimension>,

    pub table: DataTable,

    /// Present only for files declaring LANGUAGES
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multilingual: Option<MultilingualMetadata>,
}

impl ParsedPx {
    pub fn is_multilingual(&self) -> bool {
        self.multilingual.is_some()
    }

    /// TITLE of the document in the resolved language
    pub fn title(&self) -> Option<String> {
        self.metadata
            .get(keywords::TITLE)
            .map(|value| value.joined(" "))
    }

    /// Translation map, empty for monolingual files
    pub fn translation_map(&self) -> TranslationMap {
        self.multilingual
            .as_ref()
            .map(|multilingual| multilingual.translation_map.clone())
            .unwrap_or_default()
    }
}
