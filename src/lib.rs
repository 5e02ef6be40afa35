//! PX Processor Library
//!
//! A Rust library for reading PC-Axis (PX) statistical files into structured
//! metadata and flat data tables.
//!
//! This library provides tools for:
//! - Splitting PX documents into metadata statements and the DATA block
//! - Building an ordered metadata dictionary from `NAME=VALUES` statements
//! - Resolving multilingual files into a per-language view and a translation map
//! - Expanding STUB/HEADING dimensions into a cartesian-product data table
//! - Fetching documents from disk or HTTP with charset decoding
//! - Exporting tables to CSV/TSV and JSON-Stat

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch;
        pub mod export;
        pub mod fetcher;
        pub mod language_resolver;
        pub mod px_parser;
        pub mod table_builder;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    DataRow, DataTable, DataValue, Dimension, MetadataDictionary, MetadataValue,
    MultilingualMetadata, ParsedPx,
};
pub use app::services::px_parser::PxParser;
pub use config::Config;

/// Result type alias for the PX processor
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of document acquisition failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Request timed out
    Timeout,
    /// Could not connect to the remote host
    Connection,
    /// Server answered with a non-success status code
    HttpStatus(u16),
    /// The URI could not be used for a request
    InvalidUri,
    /// Anything else reported by the HTTP client
    Other,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::Connection => write!(f, "connection failure"),
            TransportKind::HttpStatus(code) => write!(f, "HTTP status {}", code),
            TransportKind::InvalidUri => write!(f, "invalid URI"),
            TransportKind::Other => write!(f, "transport failure"),
        }
    }
}

/// Error types for PX processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Structurally invalid PX text
    #[error("PX format error: {message}")]
    Format { message: String },

    /// A STUB/HEADING dimension has no VALUES entry
    #[error("Missing dimension values: '{dimension}' declared but '{key}' not found")]
    MissingDimension { dimension: String, key: String },

    /// Data token count does not match the dimension cartesian product
    #[error("Misaligned data: dimensions describe {expected} cells but DATA holds {found} values")]
    MisalignedData { expected: usize, found: usize },

    /// Requested language is not declared in LANGUAGES
    #[error("Language '{language}' not found in LANGUAGES ({})", .available.join(", "))]
    LanguageNotFound {
        language: String,
        available: Vec<String>,
    },

    /// Document acquisition failed
    #[error("Transport error ({kind}) fetching '{uri}': {message}")]
    Transport {
        uri: String,
        kind: TransportKind,
        message: String,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Unknown character encoding label
    #[error("Unsupported encoding: {label}")]
    Encoding { label: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Table export failed
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a missing dimension error
    pub fn missing_dimension(dimension: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingDimension {
            dimension: dimension.into(),
            key: key.into(),
        }
    }

    /// Create a misaligned data error
    pub fn misaligned_data(expected: usize, found: usize) -> Self {
        Self::MisalignedData { expected, found }
    }

    /// Create a language not found error
    pub fn language_not_found(language: impl Into<String>, available: &[String]) -> Self {
        Self::LanguageNotFound {
            language: language.into(),
            available: available.to_vec(),
        }
    }

    /// Create a transport error
    pub fn transport(uri: impl Into<String>, kind: TransportKind, message: impl Into<String>) -> Self {
        Self::Transport {
            uri: uri.into(),
            kind,
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an encoding error
    pub fn encoding(label: impl Into<String>) -> Self {
        Self::Encoding {
            label: label.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an export error
    pub fn export(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Export {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for errors raised by the parsing core rather than I/O or export
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Format { .. }
                | Self::MissingDimension { .. }
                | Self::MisalignedData { .. }
                | Self::LanguageNotFound { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Export {
            message: "Polars operation failed".to_string(),
            source: Box::new(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Export {
            message: "JSON serialization failed".to_string(),
            source: Box::new(error),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid pattern: {}", error),
        }
    }
}
