//! Prediction orchestration
//!
//! Combines vectorization, scoring, confidence bucketing, explanation and
//! feature extraction into a single article → result transformation.

use crate::classifier::{ClassPrediction, Classifier};
use crate::confidence;
use crate::explanation::generate_explanation;
use crate::features::extract_features;
use crate::model_loader::ModelContext;
use crate::vectorizer::Vectorizer;
use std::time::Instant;
use tracing::debug;
use veracity_core::{Article, Error, PredictionResult, Result, ScoredPrediction};

/// Runs predictions against a fixed model context
#[derive(Debug, Clone)]
pub struct Predictor {
    context: ModelContext,
}

impl Predictor {
    /// Create a predictor over a loaded (or unloaded) context
    pub fn new(context: ModelContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ModelContext {
        &self.context
    }

    /// Classify an article that has already passed validation.
    ///
    /// Fails with `ModelUnavailable` when the context is incomplete and with
    /// `PredictionFailed` for any error raised along the way.
    pub fn predict(&self, article: &Article) -> Result<PredictionResult> {
        let (Some(vectorizer), Some(classifier)) =
            (self.context.vectorizer(), self.context.classifier())
        else {
            return Err(Error::model_unavailable(
                "vectorizer or classifier is not loaded",
            ));
        };

        let start = Instant::now();
        let scored = score(vectorizer.as_ref(), classifier.as_ref(), article)
            .map_err(Error::prediction_failed)?;

        let result = PredictionResult {
            label: scored.label,
            probability: scored.rounded_score(),
            confidence: confidence::tier(scored.score),
            explanation: generate_explanation(
                scored.label,
                scored.score,
                &article.title,
                &article.text,
                &article.source,
            ),
            features: extract_features(&article.title, &article.text, &article.source),
        };

        debug!(
            label = %result.label,
            score = scored.score,
            confidence = %result.confidence,
            latency_us = start.elapsed().as_micros() as u64,
            "Prediction complete"
        );
        Ok(result)
    }
}

fn score(
    vectorizer: &dyn Vectorizer,
    classifier: &dyn Classifier,
    article: &Article,
) -> Result<ScoredPrediction> {
    let vector = vectorizer.vectorize(&article.combined_text())?;
    let prediction = classifier.predict(&vector)?;
    let (fake_probability, real_probability) = resolve_probabilities(&prediction)?;
    Ok(ScoredPrediction::new(
        prediction.class_index,
        fake_probability,
        real_probability,
    ))
}

/// Split classifier output into `(fake, real)` probabilities.
///
/// Index 1 is fake and index 0 is real. A classifier that exposes a single
/// probability is treated as reporting the real class; fake is its
/// complement. This accommodates collapsed binary models and has only been
/// checked against the logistic regression backend.
pub fn resolve_probabilities(prediction: &ClassPrediction) -> Result<(f64, f64)> {
    let (fake, real) = match prediction.probabilities.as_slice() {
        [] => return Err(Error::classifier("classifier returned no probabilities")),
        [only] => (1.0 - only, *only),
        [real, fake, ..] => (*fake, *real),
    };

    if !fake.is_finite() || !real.is_finite() {
        return Err(Error::classifier(format!(
            "classifier returned non-finite probabilities ({real}, {fake})"
        )));
    }

    Ok((fake, real))
}
