//! Fallback chains: ordered lists of candidate producers evaluated left to right,
//! stopping at the first one that yields a value.

use crate::reference::model::Localized;

/// A lazily evaluated candidate in a fallback chain.
pub type Candidate<'a, T> = &'a dyn Fn() -> Option<T>;

/// First candidate that produces a value. Later candidates are never evaluated.
pub fn first_present<T>(candidates: &[Candidate<'_, T>]) -> Option<T> {
    candidates.iter().find_map(|candidate| candidate())
}

/// First entry tagged with `language`.
pub fn localized<'a, T: Localized>(entries: &'a [T], language: &str) -> Option<&'a T> {
    entries.iter().find(|entry| entry.language() == language)
}

/// `Some(trimmed)` unless the text is blank.
pub fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Collapse line breaks, form feeds and runs of whitespace into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
