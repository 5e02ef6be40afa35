//! Single-language views of a multilingual dictionary

use crate::app::models::{MetadataDictionary, MetadataValue};
use crate::app::services::px_parser::text::{bracket_language, strip_brackets, unique};
use crate::constants::keywords;
use tracing::warn;

/// Default-language view and the fields that have translations
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultView {
    /// Every unbracketed key, in file order
    pub view: MetadataDictionary,

    /// Default-language names of fields followed by bracketed variants
    pub multilingual_fields: Vec<String>,
}

/// Language tag of `key` when it is a bracketed variant of a declared language
fn variant_language<'a>(key: &'a str, languages: &[String]) -> Option<&'a str> {
    bracket_language(key)
        .map(|(_, language)| language)
        .filter(|language| languages.iter().any(|declared| declared == language))
}

/// Drop bracketed variants and record which fields they belong to
///
/// A bracketed key belongs to the closest unbracketed key before it.
pub fn default_view(dictionary: &MetadataDictionary, languages: &[String]) -> DefaultView {
    let (view, fields, _) = dictionary.iter().fold(
        (MetadataDictionary::new(), Vec::new(), None::<&str>),
        |(mut view, mut fields, last_unbracketed), (key, value)| {
            if variant_language(key, languages).is_none() {
                view.insert(key, value.clone());
                return (view, fields, Some(key));
            }

            match last_unbracketed {
                Some(previous) => fields.push(previous.to_string()),
                None => {
                    warn!(
                        "Bracketed key '{}' has no preceding default-language field",
                        key
                    );
                    fields.push(strip_brackets(key));
                }
            }
            (view, fields, last_unbracketed)
        },
    );

    DefaultView {
        view,
        multilingual_fields: unique(&fields),
    }
}

/// View of the dictionary in a non-default language
///
/// `<base>[lang]` replaces the default-language entry that precedes it and is
/// stored under its bracket-stripped name. Variants of other languages are
/// dropped. `LANGUAGE` and `LANGUAGES` are rewritten for the view.
pub fn language_view(
    dictionary: &MetadataDictionary,
    languages: &[String],
    language: &str,
) -> MetadataDictionary {
    let (view, _) = dictionary.iter().fold(
        (MetadataDictionary::new(), None::<&str>),
        |(mut view, last_unbracketed), (key, value)| {
            match variant_language(key, languages) {
                Some(tag) if tag == language => {
                    if let Some(previous) = last_unbracketed {
                        view.remove(previous);
                    }
                    view.insert(strip_brackets(key), value.clone());
                    (view, last_unbracketed)
                }
                Some(_) => (view, last_unbracketed),
                None => {
                    let value = match key {
                        keywords::LANGUAGE => MetadataValue::list([language]),
                        keywords::LANGUAGES => MetadataValue::list(languages.iter().cloned()),
                        _ => value.clone(),
                    };
                    view.insert(key, value);
                    (view, Some(key))
                }
            }
        },
    );

    view
}
