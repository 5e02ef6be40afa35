//! String helpers shared by the PX services

use crate::constants::QUOTE;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Any bracketed span, shortest match
static BRACKETS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("valid brackets regex"));

/// Deduplicate while keeping the first occurrence of each item
pub fn unique<T>(items: &[T]) -> Vec<T>
where
    T: Clone + Eq + std::hash::Hash,
{
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Remove every `[...]` span from a string
pub fn strip_brackets(expression: &str) -> String {
    BRACKETS_REGEX.replace_all(expression, "").into_owned()
}

/// Split a `BASE[lang]` key into its base name and language tag
///
/// Only a trailing bracket counts; `VALUES(x)[fr]` yields `("VALUES(x)", "fr")`.
pub fn bracket_language(key: &str) -> Option<(&str, &str)> {
    let without_close = key.strip_suffix(']')?;
    let open = without_close.rfind('[')?;
    let language = &without_close[open + 1..];
    if language.is_empty() {
        return None;
    }
    Some((&key[..open], language))
}

/// Contents of every complete double-quoted span, with surrounding spaces trimmed
pub fn quoted_segments(values: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut start: Option<usize> = None;

    for (index, ch) in values.char_indices() {
        if ch != QUOTE {
            continue;
        }
        match start.take() {
            Some(from) => segments.push(values[from..index].trim_matches(' ').to_string()),
            None => start = Some(index + ch.len_utf8()),
        }
    }

    segments
}
