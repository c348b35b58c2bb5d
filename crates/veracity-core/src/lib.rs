//! Veracity Core
//!
//! Core types and error handling shared across Veracity components.
//!
//! This crate provides:
//! - The article and prediction types exchanged with clients
//! - Article validation (field length limits)
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    round_score, Article, ConfidenceTier, FeatureSummary, Label, PredictionResult,
    ScoredPrediction,
};
