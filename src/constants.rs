//! Application constants for PX processor
//!
//! This module contains the structural keywords of the PC-Axis format,
//! default recoding patterns, and fetch/output defaults used throughout
//! the PX processor.

// =============================================================================
// PX Structure
// =============================================================================

/// Marker separating the metadata section from the data block
pub const DATA_MARKER: &str = "DATA=";

/// Statement terminator in the metadata section
pub const STATEMENT_SEPARATOR: char = ';';

/// Separator between attribute name and value
pub const ASSIGNMENT_SEPARATOR: char = '=';

/// Quotation mark delimiting string values
pub const QUOTE: char = '"';

/// Structural metadata keywords interpreted by the parser
pub mod keywords {
    /// Default language of a multilingual file
    pub const LANGUAGE: &str = "LANGUAGE";

    /// Every language present in a multilingual file
    pub const LANGUAGES: &str = "LANGUAGES";

    /// Row dimensions, slowest varying first
    pub const STUB: &str = "STUB";

    /// Column dimensions, following the STUB dimensions
    pub const HEADING: &str = "HEADING";

    /// Prefix of the per-dimension member list, `VALUES(name)`
    pub const VALUES: &str = "VALUES";

    /// Prefix of the per-dimension code list, `CODES(name)`
    pub const CODES: &str = "CODES";

    pub const TITLE: &str = "TITLE";
    pub const NOTE: &str = "NOTE";
    pub const SOURCE: &str = "SOURCE";
    pub const DECIMALS: &str = "DECIMALS";
    pub const UNITS: &str = "UNITS";

    /// Build the `PREFIX(name)` key for a dimension
    pub fn dimension_key(prefix: &str, dimension: &str) -> String {
        format!("{}({})", prefix, dimension)
    }
}

// =============================================================================
// Data Recoding
// =============================================================================

/// Pattern for tokens recoded as missing values (a quoted single dot)
pub const DEFAULT_NULL_PATTERN: &str = r#"^"\."$"#;

/// Pattern for statistical disclosure tokens (a quoted double dot)
pub const DEFAULT_SD_PATTERN: &str = r#"^"\.\."$"#;

/// Column name of the value column in exported tables
pub const DATA_COLUMN: &str = "DATA";

// =============================================================================
// Fetching
// =============================================================================

/// Default charset for PX documents
pub const DEFAULT_ENCODING: &str = "ISO-8859-15";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// File extension of PX documents
pub const PX_EXTENSION: &str = "px";

// =============================================================================
// Output
// =============================================================================

/// Default field separator for delimited export
pub const DEFAULT_CSV_SEPARATOR: u8 = b',';

/// Name of the metric dimension added by the JSON-Stat projection
pub const JSON_STAT_METRIC_DIMENSION: &str = "Variables";

/// JSON-Stat format version emitted
pub const JSON_STAT_VERSION: &str = "2.0";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PX_PROCESSOR_";
