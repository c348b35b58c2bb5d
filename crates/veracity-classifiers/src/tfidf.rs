//! Pre-fitted TF-IDF vectorizer
//!
//! Loaded from a JSON artifact exported by the offline training job. The
//! artifact carries the fitted vocabulary and IDF weights plus the analyzer
//! settings used at fit time, so inference tokenizes exactly like training.

use crate::vectorizer::Vectorizer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sprs::CsVec;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;
use veracity_core::{Error, Result};

/// Runs of two or more word characters
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Row normalization applied after IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// Serialized form of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfConfig {
    /// Term (or space-joined n-gram) to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    pub idf: Vec<f64>,

    /// Inclusive n-gram range over word tokens
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Lowercase text before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Tokens dropped before n-grams are built
    #[serde(default)]
    pub stop_words: Vec<String>,

    /// Use `1 + ln(tf)` instead of raw counts
    #[serde(default)]
    pub sublinear_tf: bool,

    #[serde(default)]
    pub norm: Norm,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

impl TfidfConfig {
    /// Check that vocabulary, IDF weights and n-gram range agree
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::artifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        if self.vocabulary.is_empty() {
            return Err(Error::artifact("vectorizer vocabulary is empty"));
        }

        if let Some((term, col)) = self
            .vocabulary
            .iter()
            .find(|(_, col)| **col >= self.idf.len())
        {
            return Err(Error::artifact(format!(
                "term '{term}' maps to column {col} but only {} idf weights are present",
                self.idf.len()
            )));
        }

        let columns: HashSet<usize> = self.vocabulary.values().copied().collect();
        if columns.len() != self.vocabulary.len() {
            return Err(Error::artifact("vocabulary maps several terms to one column"));
        }

        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(Error::artifact("idf weights must be finite"));
        }

        Ok(())
    }
}

/// TF-IDF vectorizer with a fixed, pre-fitted vocabulary
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    name: String,
    config: TfidfConfig,
    stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    /// Create a vectorizer from a fitted configuration
    pub fn new(config: TfidfConfig) -> Result<Self> {
        Self::with_name("tfidf", config)
    }

    pub fn with_name(name: impl Into<String>, config: TfidfConfig) -> Result<Self> {
        config.validate()?;

        let stop_words = config
            .stop_words
            .iter()
            .map(|w| {
                if config.lowercase {
                    w.to_lowercase()
                } else {
                    w.clone()
                }
            })
            .collect();

        Ok(Self {
            name: name.into(),
            config,
            stop_words,
        })
    }

    /// Parse a JSON artifact
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TfidfConfig = serde_json::from_str(json)?;
        Self::new(config)
    }

    /// Load a JSON artifact from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::artifact(format!(
                "failed to read vectorizer {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&content)
    }

    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    /// Word tokens after lowercasing and stop word removal
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.config.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        TOKEN_PATTERN
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// All n-grams in the configured range, in document order
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let (min_n, max_n) = self.config.ngram_range;

        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }
}

impl Vectorizer for TfidfVectorizer {
    fn vectorize(&self, text: &str) -> Result<CsVec<f64>> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(text) {
            if let Some(&col) = self.config.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts.into_iter().collect();
        entries.sort_unstable_by_key(|(col, _)| *col);

        // Apply IDF
        for (col, val) in entries.iter_mut() {
            if self.config.sublinear_tf {
                *val = 1.0 + val.ln();
            }
            *val *= self.config.idf[*col];
        }

        if self.config.norm == Norm::L2 {
            let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, val) in entries.iter_mut() {
                    *val /= norm;
                }
            }
        }

        // Columns are unique, sorted and below idf.len() after validation
        let (indices, data): (Vec<usize>, Vec<f64>) = entries.into_iter().unzip();
        let vector = CsVec::new(self.num_features(), indices, data);

        debug!(
            vectorizer = %self.name,
            nnz = vector.nnz(),
            "Vectorized document"
        );
        Ok(vector)
    }

    fn num_features(&self) -> usize {
        self.config.idf.len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
