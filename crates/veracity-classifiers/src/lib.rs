//! Veracity Classifiers
//!
//! The fake news prediction pipeline:
//! - Vectorization: raw text to a sparse TF-IDF vector ([`Vectorizer`])
//! - Scoring: sparse vector to class probabilities ([`Classifier`])
//! - Confidence bucketing of the winning probability
//! - Heuristic explanation and lexical feature extraction for display
//!
//! Vectorizer and classifier are pre-fitted, loaded once from JSON artifacts
//! into an immutable [`ModelContext`], and shared read-only by every request.

pub mod classifier;
pub mod confidence;
pub mod explanation;
pub mod features;
pub mod lexicon;
pub mod logistic;
pub mod model_loader;
pub mod pipeline;
pub mod tfidf;
pub mod vectorizer;

pub use classifier::{ClassPrediction, Classifier};
pub use confidence::{tier, HIGH_CONFIDENCE_THRESHOLD, MEDIUM_CONFIDENCE_THRESHOLD};
pub use explanation::{explanation_factors, generate_explanation, Factor, DISCLAIMER};
pub use features::extract_features;
pub use logistic::LogisticRegression;
pub use model_loader::{ModelContext, ModelPaths};
pub use pipeline::{resolve_probabilities, Predictor};
pub use tfidf::{TfidfConfig, TfidfVectorizer};
pub use vectorizer::Vectorizer;

/// Sparse row type exchanged between vectorizers and classifiers
pub use sprs::CsVec;
