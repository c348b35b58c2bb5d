//! Shared lexical heuristics
//!
//! The explanation generator and the feature extractor both read these, so
//! the word lists live here and nowhere else.

use aho_corasick::AhoCorasick;
use std::sync::LazyLock;

/// Title phrases that mark sensational framing (matched case-insensitively)
pub const SENSATIONAL_WORDS: &[&str] = &[
    "shocking",
    "unbelievable",
    "amazing",
    "incredible",
    "you won't believe",
];

/// Source fragments that look like a conventional domain
pub const CREDIBLE_SOURCE_INDICATORS: &[&str] = &[".com", ".org", ".gov", ".edu"];

/// Bodies with fewer whitespace-separated words are flagged as short
pub const SHORT_ARTICLE_WORDS: usize = 50;

static SENSATIONAL: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(SENSATIONAL_WORDS)
        .expect("sensational word list builds a matcher")
});

static CREDIBLE_SOURCE: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(CREDIBLE_SOURCE_INDICATORS)
        .expect("source indicator list builds a matcher")
});

/// Title contains any sensational phrase
pub fn has_sensational_language(title: &str) -> bool {
    SENSATIONAL.is_match(title)
}

/// Every cased character is upper-case and at least one exists.
///
/// Strings without letters ("2024!") are not all-caps, and a titlecase
/// digraph such as `ǅ` counts as cased but not upper-case.
pub fn is_all_caps(title: &str) -> bool {
    let mut has_upper = false;
    for c in title.chars() {
        if c.is_lowercase() || is_titlecase(c) {
            return false;
        }
        has_upper |= c.is_uppercase();
    }
    has_upper
}

/// Unicode general category Lt
fn is_titlecase(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// Word separator: Unicode white space plus the ASCII information
/// separators U+001C..=U+001F
fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Count of non-empty runs between word separators
pub fn word_count(text: &str) -> usize {
    text.split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

pub fn is_short_article(text: &str) -> bool {
    word_count(text) < SHORT_ARTICLE_WORDS
}

/// Source contains none of the usual top-level domains
pub fn has_unusual_source(source: &str) -> bool {
    !CREDIBLE_SOURCE.is_match(source)
}
