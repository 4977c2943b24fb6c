//! Accent- and case-insensitive text matching.
//!
//! These primitives are unconditional: minimum query lengths and similar
//! UX thresholds belong to the callers.

use strsim::jaro_winkler;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip diacritics from `text` by NFD-decomposing and dropping combining marks.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Search key: trimmed, lowercased, accent-free, single-spaced.
pub fn normalize(text: &str) -> String {
    strip_accents(&text.trim().to_lowercase())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `target` contains `query` after normalizing both.
///
/// A blank query matches nothing.
pub fn contains(target: &str, query: &str) -> bool {
    let query = normalize(query);
    if query.is_empty() {
        return false;
    }
    normalize(target).contains(&query)
}

/// Jaro-Winkler similarity of the normalized forms, in `0.0..=1.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(&normalize(a), &normalize(b))
}
