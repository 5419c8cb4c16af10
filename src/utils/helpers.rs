//! Helper functions and utilities
//!
//! Text helpers shared by the request adapter, the scenes and the trivia.

use std::sync::OnceLock;
use regex::Regex;

fn punctuation() -> &'static Regex {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    PUNCTUATION.get_or_init(|| Regex::new(r"[^\w\s]+").expect("static regex"))
}

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Normalize an utterance or a button title for comparison.
///
/// Lower-cases, replaces `ё` with `е`, strips punctuation and collapses
/// whitespace, so "Софийский собор!" and "софийский  собор" compare equal.
pub fn normalize_utterance(text: &str) -> String {
    let lowered = text.to_lowercase().replace('ё', "е");
    let stripped = punctuation().replace_all(&lowered, " ");
    whitespace().replace_all(stripped.trim(), " ").into_owned()
}

/// Check whether a normalized utterance mentions a phrase as whole words
pub fn mentions(normalized: &str, phrase: &str) -> bool {
    let phrase = normalize_utterance(phrase);
    if phrase.is_empty() {
        return false;
    }
    normalized == phrase
        || normalized.starts_with(&format!("{} ", phrase))
        || normalized.ends_with(&format!(" {}", phrase))
        || normalized.contains(&format!(" {} ", phrase))
}
