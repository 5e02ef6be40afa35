//! Multilingual metadata resolution
//!
//! A multilingual PX file declares `LANGUAGES` and repeats every translatable
//! field once per extra language as a bracketed key, e.g.
//!
//! ```text
//! TITLE="Bevölkerung";
//! TITLE[fr]="Population";
//! TITLE[it]="Popolazione";
//! ```
//!
//! The unbracketed occurrence holds the default language (first element of
//! `LANGUAGE`) and must precede its bracketed variants. This module derives:
//! - [`views`] - the metadata as seen in one language
//! - [`translation`] - a map from field name to its value in every language
//!
//! ## Usage
//!
//! ```rust
//! use px_processor::app::services::language_resolver::{LanguagePolicy, LanguageResolver};
//! use px_processor::app::services::px_parser::{dictionary, sections};
//!
//! # fn example() -> px_processor::Result<()> {
//! let text = r#"LANGUAGE="de";LANGUAGES="de","fr";TITLE="Haus";TITLE[fr]="Maison";DATA=1;"#;
//! let metadata = dictionary::build(&sections::extract(text)?.attributes)?;
//!
//! let resolution = LanguageResolver::new(LanguagePolicy::Strict).resolve(metadata, Some("fr"))?;
//! assert_eq!(resolution.view().get_list("TITLE"), Some(&["Maison".to_string()][..]));
//! # Ok(())
//! # }
//! ```

pub mod translation;
pub mod views;

#[cfg(test)]
pub mod tests;

use crate::app::models::{MetadataDictionary, MetadataValue, MultilingualMetadata, TranslationMap};
use crate::constants::keywords;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use translation::build_translation_map;
pub use views::{DefaultView, default_view, language_view};

/// How to treat a requested language that the file does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LanguagePolicy {
    /// Fail with [`Error::LanguageNotFound`]
    #[default]
    Strict,
    /// Log a warning and resolve anyway; only shared keys survive
    Lenient,
}

/// Metadata after language resolution
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No `LANGUAGES` key; the dictionary as parsed
    Monolingual(MetadataDictionary),
    /// View for the requested language plus translations
    Multilingual(MultilingualMetadata),
}

impl Resolution {
    /// Metadata as seen in the resolved language
    pub fn view(&self) -> &MetadataDictionary {
        match self {
            Resolution::Monolingual(dictionary) => dictionary,
            Resolution::Multilingual(multilingual) => &multilingual.view,
        }
    }

    /// Translation map; always empty for monolingual files
    pub fn translation_map(&self) -> TranslationMap {
        match self {
            Resolution::Monolingual(_) => TranslationMap::new(),
            Resolution::Multilingual(multilingual) => multilingual.translation_map.clone(),
        }
    }

    /// Split into the view and the multilingual details
    pub fn into_parts(self) -> (MetadataDictionary, Option<MultilingualMetadata>) {
        match self {
            Resolution::Monolingual(dictionary) => (dictionary, None),
            Resolution::Multilingual(multilingual) => {
                (multilingual.view.clone(), Some(multilingual))
            }
        }
    }
}

/// Resolves multilingual dictionaries to a single language
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageResolver {
    policy: LanguagePolicy,
}

impl LanguageResolver {
    pub fn new(policy: LanguagePolicy) -> Self {
        Self { policy }
    }

    /// Resolve `dictionary` for `requested`, defaulting to the file's default language
    pub fn resolve(
        &self,
        dictionary: MetadataDictionary,
        requested: Option<&str>,
    ) -> Result<Resolution> {
        let Some(languages) = declared_languages(&dictionary) else {
            debug!("No {} key; monolingual PX file", keywords::LANGUAGES);
            return Ok(Resolution::Monolingual(dictionary));
        };

        let default_language = default_language(&dictionary, &languages);
        let requested_language = requested.unwrap_or(&default_language).to_string();
        info!(
            "Multilingual PX file: languages={:?}, default={}, requested={}",
            languages, default_language, requested_language
        );

        self.check_presence(&languages, &requested_language)?;

        let DefaultView {
            view: default_view,
            multilingual_fields,
        } = default_view(&dictionary, &languages);

        let view = if requested_language == default_language {
            let mut view = default_view;
            if !view.contains_key(keywords::LANGUAGE) {
                view.insert(
                    keywords::LANGUAGE,
                    MetadataValue::list([default_language.as_str()]),
                );
            }
            view
        } else {
            language_view(&dictionary, &languages, &requested_language)
        };

        let translation_map = build_translation_map(
            &dictionary,
            &multilingual_fields,
            &languages,
            &default_language,
            &requested_language,
        );
        debug!(
            "Resolved {} multilingual fields into {} translations",
            multilingual_fields.len(),
            translation_map.len()
        );

        Ok(Resolution::Multilingual(MultilingualMetadata {
            languages,
            default_language,
            requested_language,
            view,
            translation_map,
        }))
    }

    fn check_presence(&self, languages: &[String], requested: &str) -> Result<()> {
        if languages.iter().any(|language| language == requested) {
            return Ok(());
        }

        match self.policy {
            LanguagePolicy::Strict => Err(Error::language_not_found(requested, languages)),
            LanguagePolicy::Lenient => {
                warn!(
                    "Language '{}' is not present in the PX file (available: {:?})",
                    requested, languages
                );
                Ok(())
            }
        }
    }
}

/// Languages declared in `LANGUAGES`, or `None` for monolingual files
pub fn declared_languages(dictionary: &MetadataDictionary) -> Option<Vec<String>> {
    let languages = dictionary.get(keywords::LANGUAGES)?.to_members();
    if languages.is_empty() {
        warn!("{} is declared but empty; treating file as monolingual", keywords::LANGUAGES);
        return None;
    }
    Some(languages)
}

/// First element of `LANGUAGE`, falling back to the first declared language
pub fn default_language(dictionary: &MetadataDictionary, languages: &[String]) -> String {
    match dictionary.get(keywords::LANGUAGE).and_then(|value| value.first()) {
        Some(language) => language.to_string(),
        None => {
            let fallback = languages.first().cloned().unwrap_or_default();
            warn!(
                "No {} key in multilingual file; using '{}' as default",
                keywords::LANGUAGE,
                fallback
            );
            fallback
        }
    }
}
