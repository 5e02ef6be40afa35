//! Quote-aware splitting of PX text
//!
//! PX values are double-quoted strings that may themselves contain the
//! statement (`;`) or assignment (`=`) separators. Splitting therefore tracks
//! whether the scan is inside a quoted span. There is no escape character:
//! every `"` toggles the state.

use crate::constants::QUOTE;

/// How the separator relates to the segments it produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// The separator terminates every segment (`A=1;B=2;`). Blank text after
    /// the last separator is not a segment; an unterminated final segment
    /// with content is still returned.
    Terminated,
    /// The separator sits between segments (`NAME=VALUE`); the text after the
    /// last separator is always the final segment, even when empty.
    Separated,
}

/// Outcome of a quote-aware split
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split<'a> {
    /// The separator never occurred outside quotes; the original input
    Unsplit(&'a str),
    /// Segments between unquoted separators
    Parts(Vec<&'a str>),
}

impl<'a> Split<'a> {
    pub fn is_split(&self) -> bool {
        matches!(self, Split::Parts(_))
    }

    /// Collapse both outcomes into a list of segments
    pub fn into_parts(self) -> Vec<&'a str> {
        match self {
            Split::Unsplit(input) => vec![input],
            Split::Parts(parts) => parts,
        }
    }
}

/// Split `input` on `separator`, ignoring separators inside double quotes
pub fn split(input: &str, separator: char, tail: Tail) -> Split<'_> {
    let mut inside_quotes = false;
    let mut parts = Vec::new();
    let mut segment_start = 0;

    for (index, ch) in input.char_indices() {
        if ch == QUOTE {
            inside_quotes = !inside_quotes;
        } else if ch == separator && !inside_quotes {
            parts.push(&input[segment_start..index]);
            segment_start = index + ch.len_utf8();
        }
    }

    if parts.is_empty() {
        return Split::Unsplit(input);
    }

    let rest = &input[segment_start..];
    match tail {
        Tail::Separated => parts.push(rest),
        Tail::Terminated if !rest.trim().is_empty() => parts.push(rest),
        Tail::Terminated => {}
    }

    Split::Parts(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_quoted_separator() {
        let result = split(r#"A="x;y";B="z""#, ';', Tail::Terminated);
        assert_eq!(result, Split::Parts(vec![r#"A="x;y""#, r#"B="z""#]));
    }

    #[test]
    fn test_split_terminated_discards_blank_tail() {
        let result = split(r#"A="x;y";B="z";  "#, ';', Tail::Terminated);
        assert_eq!(result, Split::Parts(vec![r#"A="x;y""#, r#"B="z""#]));
    }

    #[test]
    fn test_split_separated_keeps_tail() {
        let result = split(r#"VALUES("a=b")="c""#, '=', Tail::Separated);
        assert_eq!(result, Split::Parts(vec![r#"VALUES("a=b")"#, r#""c""#]));

        let result = split("a=", '=', Tail::Separated);
        assert_eq!(result, Split::Parts(vec!["a", ""]));
    }

    #[test]
    fn test_split_without_separator_returns_input() {
        let result = split(r#""only;quoted""#, ';', Tail::Terminated);
        assert_eq!(result, Split::Unsplit(r#""only;quoted""#));
        assert!(!result.is_split());
        assert_eq!(result.into_parts(), vec![r#""only;quoted""#]);
    }

    #[test]
    fn test_split_multibyte_text() {
        let result = split(r#"TÍTULO="año;ñ";X=1;"#, ';', Tail::Terminated);
        assert_eq!(result.into_parts(), vec![r#"TÍTULO="año;ñ""#, "X=1"]);
    }

    #[test]
    fn test_split_unbalanced_quote_swallows_rest() {
        let result = split(r#"A="x;B=2;"#, ';', Tail::Terminated);
        assert_eq!(result, Split::Unsplit(r#"A="x;B=2;"#));
    }
}
