//! Dimension extraction and data table construction
//!
//! - [`dimensions`] - STUB/HEADING names, `VALUES(..)` members and `CODES(..)`
//! - [`builder`] - cartesian product aligned with DATA tokens
//! - [`recode`] - missing and statistical disclosure markers

pub mod builder;
pub mod dimensions;
pub mod recode;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use builder::{CartesianProduct, TableBuilder, expected_rows};
pub use dimensions::{dimensions, get_codes, get_dimensions};
pub use recode::RecodeRules;
