//! Lexical feature summary for client display

use crate::lexicon;
use veracity_core::FeatureSummary;

/// Summarize the raw article fields
pub fn extract_features(title: &str, text: &str, source: &str) -> FeatureSummary {
    FeatureSummary {
        title_length: title.chars().count(),
        text_length: text.chars().count(),
        word_count: lexicon::word_count(text),
        source: source.to_string(),
        has_sensational_title: lexicon::has_sensational_language(title),
        title_all_caps: lexicon::is_all_caps(title),
    }
}
