//! Text normalization helpers shared by the detector, validator and resolver.

use regex::Regex;
use std::sync::OnceLock;

// Anything that is not a letter (with its combining marks), a digit,
// whitespace, an apostrophe or a hyphen.
static SYMBOL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Remove emoji and other symbols, keeping letters of every script, digits,
/// whitespace, apostrophes and hyphens. The result is trimmed.
pub fn strip_symbols(text: &str) -> String {
    let regex = SYMBOL_REGEX.get_or_init(|| Regex::new(r"[^\p{L}\p{M}\p{N}\s'-]").unwrap());

    regex.replace_all(text, "").trim().to_string()
}

/// `strip_symbols` followed by lowercasing: the form used for dictionary keys.
pub fn fold(text: &str) -> String {
    strip_symbols(text).to_lowercase()
}

/// Shorten text for log output, respecting character boundaries.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
