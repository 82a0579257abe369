//! Text normalization

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("Invalid alphanumeric regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Canonicalize raw extracted text into a comparable token stream.
///
/// Lowercases, replaces everything outside `[a-z0-9]` and whitespace with a
/// space, collapses whitespace runs and trims. Never fails; empty in, empty out.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_ALPHANUMERIC.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Counts over normalized text, shown in verbose output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub word_count: usize,
    pub character_count: usize,
}

impl TextStats {
    pub fn of(normalized: &str) -> Self {
        Self {
            word_count: normalized.split(' ').filter(|w| !w.is_empty()).count(),
            character_count: normalized.chars().count(),
        }
    }
}
