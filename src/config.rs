//! Configuration management and validation.
//!
//! Provides configuration structures for parsing, fetching, output and
//! concurrency, loaded in layers: defaults, an optional JSON config file,
//! `PX_PROCESSOR_*` environment variables, then CLI overrides.

use crate::app::services::language_resolver::LanguagePolicy;
use crate::app::services::table_builder::RecodeRules;
use crate::constants::{
    DEFAULT_CSV_SEPARATOR, DEFAULT_ENCODING, DEFAULT_NULL_PATTERN, DEFAULT_SD_PATTERN,
    DEFAULT_TIMEOUT_SECS, ENV_PREFIX,
};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Parsing behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Regex for tokens recoded as missing
    pub null_pattern: String,

    /// Regex for tokens recoded as statistically disclosed (not-a-number)
    pub sd_pattern: String,

    /// Language to resolve multilingual files to (default language if unset)
    pub language: Option<String>,

    /// Behaviour when the requested language is not declared
    pub language_policy: LanguagePolicy,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            null_pattern: DEFAULT_NULL_PATTERN.to_string(),
            sd_pattern: DEFAULT_SD_PATTERN.to_string(),
            language: None,
            language_policy: LanguagePolicy::Strict,
        }
    }
}

impl ParsingConfig {
    /// Compile the recoding patterns
    pub fn recode_rules(&self) -> Result<RecodeRules> {
        RecodeRules::new(&self.null_pattern, &self.sd_pattern)
    }
}

/// Document acquisition settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Charset label of the documents (e.g. ISO-8859-15, UTF-8)
    pub encoding: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Verify TLS certificates of remote hosts
    pub verify_tls: bool,

    /// Extra PEM certificate to trust for HTTPS
    pub ca_certificate: Option<PathBuf>,

    /// Extra HTTP request headers
    pub headers: IndexMap<String, String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_tls: true,
            ca_certificate: None,
            headers: IndexMap::new(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output formats supported by the exporters
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// Tab-separated values
    Tsv,
    /// JSON-Stat 2.0 dataset
    JsonStat,
    /// Full parse result (metadata, dimensions, translations) as JSON
    Json,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::JsonStat => "json-stat",
            OutputFormat::Json => "json",
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Field separator for CSV output; TSV always uses a tab
    pub separator: u8,

    /// Directory for generated files
    pub output_dir: Option<PathBuf>,

    /// Overwrite existing output files
    pub force_overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            separator: DEFAULT_CSV_SEPARATOR,
            output_dir: None,
            force_overwrite: false,
        }
    }
}

impl OutputConfig {
    /// Separator actually used for the configured format
    pub fn effective_separator(&self) -> u8 {
        match self.format {
            OutputFormat::Tsv => b'\t',
            _ => self.separator,
        }
    }
}

/// Concurrency settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Documents parsed concurrently in batch mode
    pub workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
        }
    }
}

/// Complete processor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parsing: ParsingConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
    pub performance: PerformanceConfig,
}

impl Config {
    /// Set the language multilingual files are resolved to
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.parsing.language = Some(language.into());
        self
    }

    pub fn with_language_policy(mut self, policy: LanguagePolicy) -> Self {
        self.parsing.language_policy = policy;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.fetch.encoding = encoding.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.performance.workers = workers;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output.format = format;
        self
    }

    /// Load a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Defaults, then the config file if given, then environment overrides
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        debug!("Layered configuration: {:?}", config);
        Ok(config)
    }

    /// Apply `PX_PROCESSOR_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{}{}", ENV_PREFIX, suffix));

        if let Some(language) = var("LANGUAGE") {
            self.parsing.language = Some(language);
        }
        if let Some(encoding) = var("ENCODING") {
            self.fetch.encoding = encoding;
        }
        if let Some(timeout) = var("TIMEOUT") {
            self.fetch.timeout_secs = timeout.parse().map_err(|_| {
                Error::configuration(format!("{}TIMEOUT must be an integer, got '{}'", ENV_PREFIX, timeout))
            })?;
        }
        if let Some(workers) = var("WORKERS") {
            self.performance.workers = workers.parse().map_err(|_| {
                Error::configuration(format!("{}WORKERS must be an integer, got '{}'", ENV_PREFIX, workers))
            })?;
        }
        if let Some(null_pattern) = var("NULL_PATTERN") {
            self.parsing.null_pattern = null_pattern;
        }
        if let Some(sd_pattern) = var("SD_PATTERN") {
            self.parsing.sd_pattern = sd_pattern;
        }

        Ok(())
    }

    /// Validate patterns, encoding and numeric limits
    pub fn validate(&self) -> Result<()> {
        self.parsing.recode_rules()?;

        if encoding_rs::Encoding::for_label(self.fetch.encoding.as_bytes()).is_none() {
            return Err(Error::encoding(&self.fetch.encoding));
        }

        if self.fetch.timeout_secs == 0 {
            return Err(Error::configuration("Timeout must be at least one second"));
        }

        if self.performance.workers == 0 {
            return Err(Error::configuration("Worker count must be at least 1"));
        }

        if let Some(path) = &self.fetch.ca_certificate {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "CA certificate not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.parsing.null_pattern, DEFAULT_NULL_PATTERN);
        assert_eq!(config.fetch.encoding, DEFAULT_ENCODING);
        assert!(config.fetch.verify_tls);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut config = Config::default();
        config.parsing.null_pattern = "([".to_string();
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let config = Config::default().with_encoding("not-a-charset");
        assert!(matches!(config.validate(), Err(Error::Encoding { .. })));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = Config::default().with_workers(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PX_PROCESSOR_LANGUAGE", "fr"),
            ("PX_PROCESSOR_TIMEOUT", "30"),
            ("PX_PROCESSOR_WORKERS", "2"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.parsing.language.as_deref(), Some("fr"));
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.performance.workers, 2);
    }

    #[test]
    fn test_env_override_rejects_bad_number() {
        let mut config = Config::default();
        let result = config.apply_env(|name| {
            (name == "PX_PROCESSOR_TIMEOUT").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"parsing": {{"language": "it", "language_policy": "lenient"}}, "output": {{"format": "json-stat"}}}}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.parsing.language.as_deref(), Some("it"));
        assert_eq!(config.parsing.language_policy, LanguagePolicy::Lenient);
        assert_eq!(config.output.format, OutputFormat::JsonStat);
        assert_eq!(config.parsing.sd_pattern, DEFAULT_SD_PATTERN);
    }

    #[test]
    fn test_tsv_uses_tab_separator() {
        let config = Config::default().with_output_format(OutputFormat::Tsv);
        assert_eq!(config.output.effective_separator(), b'\t');
        assert_eq!(Config::default().output.effective_separator(), b',');
    }
}
