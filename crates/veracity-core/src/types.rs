//! Core types for Veracity

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive character limits for `Article::title`
pub const TITLE_CHARS: (usize, usize) = (1, 500);

/// Inclusive character limits for `Article::text`
pub const TEXT_CHARS: (usize, usize) = (10, 10_000);

/// Inclusive character limits for `Article::source`
pub const SOURCE_CHARS: (usize, usize) = (1, 200);

/// A news article submitted for classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article headline
    pub title: String,

    /// Article body
    pub text: String,

    /// Where the article was published (domain, outlet name, ...)
    pub source: String,
}

impl Article {
    /// Create a new article
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            source: source.into(),
        }
    }

    /// Check field lengths, counted in characters
    pub fn validate(&self) -> Result<()> {
        check_length("title", &self.title, TITLE_CHARS)?;
        check_length("text", &self.text, TEXT_CHARS)?;
        check_length("source", &self.source, SOURCE_CHARS)?;
        Ok(())
    }

    /// Title and body joined by a single space; the only text that is vectorized
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.text)
    }
}

fn check_length(field: &str, value: &str, (min, max): (usize, usize)) -> Result<()> {
    let len = value.chars().count();
    if len < min {
        return Err(Error::validation(format!(
            "{field} must be at least {min} characters (got {len})"
        )));
    }
    if len > max {
        return Err(Error::validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Binary verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Fake,
    Real,
}

impl Label {
    /// Class index 1 is fake; every other index is real
    pub fn from_class_index(index: usize) -> Self {
        if index == 1 {
            Self::Fake
        } else {
            Self::Real
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fake => "Fake",
            Self::Real => "Real",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse, human-facing bucket of a probability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output resolved to a label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPrediction {
    /// Predicted label
    pub label: Label,

    /// Probability mass assigned to `label` (0.0-1.0)
    pub score: f64,

    /// Probability of the fake class
    pub fake_probability: f64,

    /// Probability of the real class
    pub real_probability: f64,
}

impl ScoredPrediction {
    /// Resolve a label and score from the predicted class index and both class probabilities
    pub fn new(class_index: usize, fake_probability: f64, real_probability: f64) -> Self {
        let label = Label::from_class_index(class_index);
        let score = match label {
            Label::Fake => fake_probability,
            Label::Real => real_probability,
        };
        Self {
            label,
            score,
            fake_probability,
            real_probability,
        }
    }

    /// Score rounded for output
    pub fn rounded_score(&self) -> f64 {
        round_score(self.score)
    }
}

/// Round to 4 decimal places and clamp into [0, 1].
///
/// Rounds the exact binary value, so `0.50005` (stored just below the tie)
/// becomes `0.5`.
pub fn round_score(score: f64) -> f64 {
    format!("{score:.4}")
        .parse::<f64>()
        .unwrap_or(score)
        .clamp(0.0, 1.0)
}

/// Lexical signals shown to clients alongside the verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSummary {
    /// Title length in characters
    pub title_length: usize,

    /// Body length in characters
    pub text_length: usize,

    /// Whitespace-separated words in the body
    pub word_count: usize,

    /// Source string, unchanged
    pub source: String,

    /// Title contains sensational wording
    pub has_sensational_title: bool,

    /// Title is written entirely in capitals
    pub title_all_caps: bool,
}

/// Full response for one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,

    /// Score of `label`, rounded to 4 decimals
    pub probability: f64,

    pub confidence: ConfidenceTier,

    pub explanation: String,

    pub features: FeatureSummary,
}
