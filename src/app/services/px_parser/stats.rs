//! Parsing statistics and result structures for PX processing

use crate::app::models::{DataValue, ParsedPx};

/// Parsed document with basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub px: ParsedPx,
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Metadata statements found before DATA=
    pub statements: usize,

    /// Statements overwritten by a later statement with the same name
    pub duplicate_statements: usize,

    /// Attributes in the resolved metadata view
    pub attributes: usize,

    /// Languages declared by the file (0 for monolingual files)
    pub languages: usize,

    pub dimensions: usize,

    /// Rows in the flattened table
    pub rows: usize,

    /// Cells recoded as missing
    pub missing_values: usize,

    /// Cells recoded as not-a-number
    pub disclosed_values: usize,
}

impl ParseStats {
    /// Collect statistics from a finished parse
    pub fn collect(statements: usize, distinct_attributes: usize, px: &ParsedPx) -> Self {
        let (missing_values, disclosed_values) =
            px.table
                .values()
                .fold((0, 0), |(missing, disclosed), value| match value {
                    DataValue::Missing => (missing + 1, disclosed),
                    DataValue::NotANumber => (missing, disclosed + 1),
                    DataValue::Raw(_) => (missing, disclosed),
                });

        Self {
            statements,
            duplicate_statements: statements.saturating_sub(distinct_attributes),
            attributes: px.metadata.len(),
            languages: px
                .multilingual
                .as_ref()
                .map(|multilingual| multilingual.languages.len())
                .unwrap_or(0),
            dimensions: px.dimensions.len(),
            rows: px.table.len(),
            missing_values,
            disclosed_values,
        }
    }

    /// Share of cells carrying a real value, as a percentage
    pub fn fill_rate(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            let filled = self.rows - self.missing_values - self.disclosed_values;
            (filled as f64 / self.rows as f64) * 100.0
        }
    }
}
