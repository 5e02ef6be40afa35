//! Cross-language translation map
//!
//! For every multilingual field the map holds its value in each declared
//! language. Variants are found by name (`FIELD[lang]`) when the bracketed key
//! reuses the default name, as `TITLE[fr]` does. Keys such as
//! `VALUES(Sexe)[fr]` carry a translated base name, so the variant is then
//! taken from the run of bracketed keys that directly follows the field.

use crate::app::models::{FieldTranslations, MetadataDictionary, TranslationMap};
use crate::app::services::px_parser::text::{bracket_language, strip_brackets};
use tracing::warn;

/// Build the translation map for `fields`, keyed in the requested language's naming
pub fn build_translation_map(
    dictionary: &MetadataDictionary,
    fields: &[String],
    languages: &[String],
    default_language: &str,
    requested_language: &str,
) -> TranslationMap {
    let mut map = TranslationMap::new();

    for field in fields {
        let mut translations = FieldTranslations::new();
        let mut requested_name: Option<&str> = None;

        match dictionary.get(field) {
            Some(value) => {
                translations.insert(default_language.to_string(), value.clone());
                if requested_language == default_language {
                    requested_name = Some(field.as_str());
                }
            }
            None => warn!(
                "Multilingual field '{}' has no default-language entry",
                field
            ),
        }

        for language in languages.iter().filter(|l| l.as_str() != default_language) {
            match find_variant(dictionary, field, languages, language) {
                Some(key) => {
                    if let Some(value) = dictionary.get(key) {
                        translations.insert(language.clone(), value.clone());
                    }
                    if language == requested_language {
                        requested_name = Some(key);
                    }
                }
                None => warn!(
                    "No '{}' variant found for field '{}'; translation map entry is incomplete",
                    language, field
                ),
            }
        }

        let name = strip_brackets(requested_name.unwrap_or(field.as_str()));
        map.insert(name, translations);
    }

    map
}

/// Key of the `language` variant of `field`
fn find_variant<'a>(
    dictionary: &'a MetadataDictionary,
    field: &str,
    languages: &[String],
    language: &str,
) -> Option<&'a str> {
    let direct = format!("{}[{}]", field, language);
    if let Some(position) = dictionary.position(&direct) {
        return dictionary.get_index(position).map(|(key, _)| key);
    }

    let start = dictionary.position(field)? + 1;
    (start..dictionary.len())
        .map_while(|index| {
            let (key, _) = dictionary.get_index(index)?;
            let (_, tag) = bracket_language(key)?;
            languages
                .iter()
                .any(|declared| declared == tag)
                .then_some((key, tag))
        })
        .find(|(_, tag)| *tag == language)
        .map(|(key, _)| key)
}
