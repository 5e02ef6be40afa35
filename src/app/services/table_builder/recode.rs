//! Recoding of missing and statistically disclosed data tokens

use crate::app::models::DataValue;
use crate::constants::{DEFAULT_NULL_PATTERN, DEFAULT_SD_PATTERN};
use crate::{Error, Result};
use regex::Regex;

/// Patterns that turn raw DATA tokens into missing or not-a-number markers
#[derive(Debug, Clone)]
pub struct RecodeRules {
    null_pattern: Regex,
    sd_pattern: Regex,
}

impl RecodeRules {
    /// Compile the null and statistical disclosure patterns
    pub fn new(null_pattern: &str, sd_pattern: &str) -> Result<Self> {
        let compile = |label: &str, pattern: &str| {
            Regex::new(pattern).map_err(|e| {
                Error::configuration(format!("Invalid {} pattern '{}': {}", label, pattern, e))
            })
        };

        Ok(Self {
            null_pattern: compile("null", null_pattern)?,
            sd_pattern: compile("statistical disclosure", sd_pattern)?,
        })
    }

    pub fn null_pattern(&self) -> &str {
        self.null_pattern.as_str()
    }

    pub fn sd_pattern(&self) -> &str {
        self.sd_pattern.as_str()
    }

    /// Recode one token; disclosure takes precedence when both patterns match
    pub fn recode(&self, token: &str) -> DataValue {
        let mut value = DataValue::Raw(token.to_string());
        if self.null_pattern.is_match(token) {
            value = DataValue::Missing;
        }
        if self.sd_pattern.is_match(token) {
            value = DataValue::NotANumber;
        }
        value
    }
}

impl Default for RecodeRules {
    fn default() -> Self {
        Self {
            null_pattern: Regex::new(DEFAULT_NULL_PATTERN).expect("valid default null pattern"),
            sd_pattern: Regex::new(DEFAULT_SD_PATTERN).expect("valid default SD pattern"),
        }
    }
}
