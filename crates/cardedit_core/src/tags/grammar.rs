//! Tag string grammar.
//!
//! Tokens are separated by commas, surrounding whitespace is trimmed and empty
//! tokens are discarded. Canonical serialization joins tokens with `", "`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator used by canonical tag strings.
pub const TAG_SEPARATOR: &str = ", ";

static TAG_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid tag split regex"));

/// Parses a tag string into tokens, preserving first-seen order.
///
/// Duplicate tokens are kept only once.
pub fn parse_tags(tags: &str) -> Vec<String> {
    let mut parsed: Vec<String> = Vec::new();
    for token in TAG_SPLIT_RE.split(tags.trim()) {
        let token = token.trim();
        if token.is_empty() || parsed.iter().any(|known| known == token) {
            continue;
        }
        parsed.push(token.to_string());
    }
    parsed
}

/// Joins tokens into a canonical tag string.
pub fn join_tags<I, S>(tags: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for tag in tags {
        if !joined.is_empty() {
            joined.push_str(TAG_SEPARATOR);
        }
        joined.push_str(tag.as_ref());
    }
    joined
}

/// Normalizes user input for a brand-new tag.
///
/// Returns `None` for empty or whitespace-only input, and for input that
/// contains the token separator (it could never round-trip as one tag).
pub fn normalize_new_tag(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains(',') {
        None
    } else {
        Some(trimmed.to_string())
    }
}
