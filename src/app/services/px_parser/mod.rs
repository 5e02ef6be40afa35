//! PX parser for PC-Axis statistical files
//!
//! This module turns PX text into an ordered metadata dictionary and a
//! flattened data table.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`splitter`] - Quote-aware splitting on statement and assignment separators
//! - [`sections`] - Metadata/DATA sectioning of the raw document
//! - [`dictionary`] - `NAME=VALUES` statements to a metadata dictionary
//! - [`text`] - Bracket and quoting helpers shared with the language resolver
//! - [`parser`] - Orchestration of the whole pipeline
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use px_processor::PxParser;
//!
//! # fn example() -> px_processor::Result<()> {
//! let text = r#"STUB="A";HEADING="B";VALUES("A")="x","y";VALUES("B")="p","q";DATA=1 2 3 4;"#;
//! let px = PxParser::default().parse_str(text)?;
//!
//! assert_eq!(px.table.len(), 4);
//! assert_eq!(px.table.rows[1].members, vec!["x", "q"]);
//! # Ok(())
//! # }
//! ```

pub mod dictionary;
pub mod parser;
pub mod sections;
pub mod splitter;
pub mod stats;
pub mod text;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::PxParser;
pub use sections::Sections;
pub use splitter::{Split, Tail, split};
pub use stats::{ParseResult, ParseStats};
