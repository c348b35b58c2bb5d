//! Natural-language rationale for a prediction
//!
//! The rationale describes lexical properties of the submitted article. It
//! does not reflect the classifier's learned weights and must not be read as
//! feature importance.

use crate::lexicon;
use std::fmt;
use veracity_core::Label;

/// Appended to every explanation
pub const DISCLAIMER: &str = "Note: This is an automated prediction and should not be the sole basis for determining authenticity. Always verify news from multiple credible sources.";

/// Heuristic factor mentioned in an explanation, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Factor {
    SensationalTitle,
    ShortContent,
    AllCapsTitle,
    UnusualSource,
}

impl Factor {
    pub fn description(&self) -> &'static str {
        match self {
            Self::SensationalTitle => "sensational language in title",
            Self::ShortContent => "very short article content",
            Self::AllCapsTitle => "title in all capitals",
            Self::UnusualSource => "unusual source format",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Factors that fire for an article, always in the same order
pub fn explanation_factors(title: &str, text: &str, source: &str) -> Vec<Factor> {
    let checks = [
        (Factor::SensationalTitle, lexicon::has_sensational_language(title)),
        (Factor::ShortContent, lexicon::is_short_article(text)),
        (Factor::AllCapsTitle, lexicon::is_all_caps(title)),
        (Factor::UnusualSource, lexicon::has_unusual_source(source)),
    ];

    checks
        .into_iter()
        .filter_map(|(factor, fired)| fired.then_some(factor))
        .collect()
}

/// Build the explanation: verdict, optional factors, disclaimer
pub fn generate_explanation(
    label: Label,
    score: f64,
    title: &str,
    text: &str,
    source: &str,
) -> String {
    let verdict = match label {
        Label::Fake => "FAKE NEWS",
        Label::Real => "REAL NEWS",
    };

    let mut sentences = vec![format!(
        "This article has been classified as {verdict} with {:.1}% confidence.",
        score * 100.0
    )];

    let factors = explanation_factors(title, text, source);
    if !factors.is_empty() {
        let listed: Vec<&str> = factors.iter().map(Factor::description).collect();
        sentences.push(format!("Factors considered: {}.", listed.join(", ")));
    }

    sentences.push(DISCLAIMER.to_string());
    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text() -> String {
        "The committee met on Tuesday to review the annual report. ".repeat(10)
    }

    #[test]
    fn test_fake_with_all_factors() {
        let explanation =
            generate_explanation(Label::Fake, 0.9234, "SHOCKING NEWS", "short body", "blog");

        assert_eq!(
            explanation,
            format!(
                "This article has been classified as FAKE NEWS with 92.3% confidence. \
                 Factors considered: sensational language in title, very short article content, \
                 title in all capitals, unusual source format. {DISCLAIMER}"
            )
        );
    }

    #[test]
    fn test_real_without_factors() {
        let explanation = generate_explanation(
            Label::Real,
            0.75,
            "Council approves budget",
            &long_text(),
            "cityhall.gov",
        );

        assert_eq!(
            explanation,
            format!("This article has been classified as REAL NEWS with 75.0% confidence. {DISCLAIMER}")
        );
        assert!(!explanation.contains("Factors considered"));
    }

    #[test]
    fn test_disclaimer_always_last() {
        let cases = [
            (Label::Fake, 0.51, "x", "y", "z"),
            (Label::Real, 1.0, "Plain title", "some words here", "news.org"),
        ];
        for (label, score, title, text, source) in cases {
            assert!(generate_explanation(label, score, title, text, source).ends_with(DISCLAIMER));
        }
    }

    #[test]
    fn test_factor_order_is_fixed() {
        let factors = explanation_factors("AMAZING", &long_text(), "unknown");
        assert_eq!(
            factors,
            vec![
                Factor::SensationalTitle,
                Factor::AllCapsTitle,
                Factor::UnusualSource
            ]
        );
        let mut sorted = factors.clone();
        sorted.sort();
        assert_eq!(factors, sorted);
    }

    #[test]
    fn test_mixed_case_sensational_title() {
        let factors = explanation_factors(
            "SHOCKING: You won't believe this!",
            &long_text(),
            "randomsite.biz",
        );
        assert_eq!(
            factors,
            vec![Factor::SensationalTitle, Factor::UnusualSource]
        );
    }
}
