//! Command-line argument definitions for the PX processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::OutputFormat;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the PX processor
///
/// Reads PC-Axis statistical files from disk or HTTP and turns them into
/// flat tables, JSON-Stat datasets or metadata reports.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "px-processor",
    version,
    about = "Parse PC-Axis (PX) statistical files into flat tables and JSON-Stat",
    long_about = "Reads PC-Axis (PX) files from local paths or HTTP(S) URLs, resolves \
                  multilingual metadata to one language and expands the STUB/HEADING \
                  dimensions into a flat table aligned with the DATA block."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse one document and export its table
    Parse(ParseArgs),
    /// Print metadata, dimensions and translations of one document
    Inspect(InspectArgs),
    /// Parse every PX file in a directory concurrently
    Batch(BatchArgs),
}

impl Commands {
    /// Options shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Parse(args) => &args.common,
            Commands::Inspect(args) => &args.common,
            Commands::Batch(args) => &args.common,
        }
    }
}

/// Parsing, fetching and logging options shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    #[arg(
        short = 'l',
        long = "language",
        value_name = "LANG",
        help = "Language to resolve multilingual files to (default: the file's LANGUAGE)"
    )]
    pub language: Option<String>,

    #[arg(
        long = "lenient",
        help = "Warn instead of failing when the requested language is not declared"
    )]
    pub lenient: bool,

    #[arg(
        short = 'e',
        long = "encoding",
        value_name = "LABEL",
        help = "Character encoding of the documents [default: ISO-8859-15]"
    )]
    pub encoding: Option<String>,

    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        help = "HTTP request timeout in seconds [default: 10]"
    )]
    pub timeout: Option<u64>,

    #[arg(long = "no-verify", help = "Do not verify TLS certificates")]
    pub no_verify: bool,

    #[arg(
        long = "ca-cert",
        value_name = "FILE",
        help = "Additional PEM certificate to trust for HTTPS"
    )]
    pub ca_cert: Option<PathBuf>,

    #[arg(
        short = 'H',
        long = "header",
        value_name = "NAME=VALUE",
        help = "Extra HTTP header, may be repeated"
    )]
    pub headers: Vec<String>,

    #[arg(
        long = "null-pattern",
        value_name = "REGEX",
        help = "Regex for DATA tokens recoded as missing"
    )]
    pub null_pattern: Option<String>,

    #[arg(
        long = "sd-pattern",
        value_name = "REGEX",
        help = "Regex for DATA tokens recoded as statistically disclosed"
    )]
    pub sd_pattern: Option<String>,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Validate option combinations and values
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if self.timeout == Some(0) {
            return Err(Error::configuration("Timeout must be at least one second"));
        }

        self.parse_headers()?;
        Ok(())
    }

    /// `NAME=VALUE` header options as pairs
    pub fn parse_headers(&self) -> Result<Vec<(String, String)>> {
        self.headers
            .iter()
            .map(|header| {
                header
                    .split_once('=')
                    .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
                    .filter(|(name, _)| !name.is_empty())
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "Invalid header '{}': expected NAME=VALUE",
                            header
                        ))
                    })
            })
            .collect()
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Local path or http(s) URL of the PX document
    #[arg(value_name = "URI")]
    pub uri: String,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the table to this file instead of printing a summary"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        help = "Output format [default: csv]"
    )]
    pub format: Option<OutputFormat>,

    #[arg(
        long = "separator",
        value_name = "CHAR",
        help = "Field separator for CSV output"
    )]
    pub separator: Option<char>,

    #[arg(long = "force", help = "Force overwrite of existing output files")]
    pub force_overwrite: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl ParseArgs {
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        if let Some(separator) = self.separator {
            if !separator.is_ascii() {
                return Err(Error::configuration(format!(
                    "Separator must be a single ASCII character, got '{}'",
                    separator
                )));
            }
        }
        Ok(())
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Local path or http(s) URL of the PX document
    #[arg(value_name = "URI")]
    pub uri: String,

    #[arg(long = "json", help = "Print the report as JSON")]
    pub json: bool,

    #[arg(
        long = "translations",
        help = "Include the full translation map of multilingual files"
    )]
    pub translations: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the batch command
#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Directory searched recursively for .px files
    #[arg(value_name = "DIR")]
    pub input_dir: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Directory for one output file per document (omit to only parse)"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        help = "Output format [default: csv]"
    )]
    pub format: Option<OutputFormat>,

    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of documents processed concurrently [default: CPU count]"
    )]
    pub workers: Option<usize>,

    #[arg(long = "force", help = "Force overwrite of existing output files")]
    pub force_overwrite: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl BatchArgs {
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if !self.input_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                self.input_dir.display()
            )));
        }

        if self.workers == Some(0) {
            return Err(Error::configuration("Worker count must be at least 1"));
        }

        Ok(())
    }
}
