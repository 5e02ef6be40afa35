//! Core PX parser implementation
//!
//! This module provides the parser orchestration: sectioning, dictionary
//! building, language resolution, dimension extraction and table building.

use tracing::{debug, info};

use super::dictionary;
use super::sections;
use super::stats::{ParseResult, ParseStats};
use crate::Result;
use crate::app::models::ParsedPx;
use crate::app::services::fetcher::DocumentSource;
use crate::app::services::language_resolver::{LanguagePolicy, LanguageResolver};
use crate::app::services::table_builder::{TableBuilder, dimensions};
use crate::config::ParsingConfig;

/// PX parser for statistical data files
///
/// Parsing is a pure transform over in-memory text; the parser holds only
/// compiled options and can be shared across tasks.
#[derive(Debug, Clone, Default)]
pub struct PxParser {
    resolver: LanguageResolver,
    table_builder: TableBuilder,
    language: Option<String>,
}

impl PxParser {
    /// Create a parser from parsing options, compiling the recoding patterns
    pub fn new(options: &ParsingConfig) -> Result<Self> {
        Ok(Self {
            resolver: LanguageResolver::new(options.language_policy),
            table_builder: TableBuilder::new(options.recode_rules()?),
            language: options.language.clone(),
        })
    }

    /// Resolve multilingual files to `language` instead of their default
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_language_policy(mut self, policy: LanguagePolicy) -> Self {
        self.resolver = LanguageResolver::new(policy);
        self
    }

    /// Parse PX text into metadata, dimensions and a data table
    pub fn parse_str(&self, text: &str) -> Result<ParsedPx> {
        self.parse_detailed(text).map(|result| result.px)
    }

    /// Parse PX text and report statistics alongside the result
    pub fn parse_detailed(&self, text: &str) -> Result<ParseResult> {
        let sections = sections::extract(text)?;
        let raw_metadata = dictionary::build(&sections.attributes)?;
        let distinct_attributes = raw_metadata.len();
        debug!(
            "Built metadata dictionary: {} statements, {} attributes",
            sections.attributes.len(),
            distinct_attributes
        );

        let resolution = self
            .resolver
            .resolve(raw_metadata, self.language.as_deref())?;
        let (metadata, multilingual) = resolution.into_parts();

        let dimensions = dimensions::dimensions(&metadata)?;
        let names: Vec<String> = dimensions.iter().map(|d| d.name.clone()).collect();
        let members: Vec<Vec<String>> = dimensions.iter().map(|d| d.members.clone()).collect();

        let table = self
            .table_builder
            .build(&names, &members, &sections.tokens())?;

        let px = ParsedPx {
            metadata,
            dimensions,
            table,
            multilingual,
        };
        let stats = ParseStats::collect(sections.attributes.len(), distinct_attributes, &px);

        Ok(ParseResult { px, stats })
    }

    /// Fetch a document through `source` and parse it
    pub async fn parse_uri<S: DocumentSource>(&self, source: &S, uri: &str) -> Result<ParseResult> {
        info!("Parsing PX document: {}", uri);

        let text = source.fetch(uri).await?;
        let result = self.parse_detailed(&text)?;

        info!(
            "Parsed {} rows across {} dimensions from {}",
            result.stats.rows, result.stats.dimensions, uri
        );
        Ok(result)
    }
}
