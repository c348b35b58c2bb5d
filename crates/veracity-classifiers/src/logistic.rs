//! Binary logistic regression scorer

use crate::classifier::{ClassPrediction, Classifier};
use serde::{Deserialize, Serialize};
use sprs::CsVec;
use std::path::Path;
use veracity_core::{Error, Result};

/// Serialized form of a fitted binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionConfig {
    /// One weight per vectorizer column
    pub coefficients: Vec<f64>,

    pub intercept: f64,

    /// Class labels in probability order; `classes[1]` is the positive class
    #[serde(default = "default_classes")]
    pub classes: Vec<usize>,
}

fn default_classes() -> Vec<usize> {
    vec![0, 1]
}

/// Logistic regression over a sparse feature vector
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    name: String,
    config: LogisticRegressionConfig,
}

impl LogisticRegression {
    pub fn new(config: LogisticRegressionConfig) -> Result<Self> {
        Self::with_name("logistic-regression", config)
    }

    pub fn with_name(name: impl Into<String>, config: LogisticRegressionConfig) -> Result<Self> {
        if config.classes.len() != 2 {
            return Err(Error::artifact(format!(
                "binary classifier needs exactly 2 classes, got {}",
                config.classes.len()
            )));
        }
        if config.coefficients.is_empty() {
            return Err(Error::artifact("classifier has no coefficients"));
        }
        if !config.intercept.is_finite() || config.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(Error::artifact("classifier weights must be finite"));
        }

        Ok(Self {
            name: name.into(),
            config,
        })
    }

    /// Parse a JSON artifact
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LogisticRegressionConfig = serde_json::from_str(json)?;
        Self::new(config)
    }

    /// Load a JSON artifact from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::artifact(format!(
                "failed to read classifier {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Number of input columns the model was fitted on
    pub fn num_features(&self) -> usize {
        self.config.coefficients.len()
    }

    /// Raw decision value `w·x + b`
    pub fn decision_function(&self, input: &CsVec<f64>) -> Result<f64> {
        if input.dim() != self.num_features() {
            return Err(Error::classifier(format!(
                "expected {} features, got {}",
                self.num_features(),
                input.dim()
            )));
        }
        let weights = &self.config.coefficients;
        let z = input
            .iter()
            .map(|(col, &value)| value * weights[col])
            .sum::<f64>();
        Ok(z + self.config.intercept)
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, input: &CsVec<f64>) -> Result<ClassPrediction> {
        let z = self.decision_function(input)?;
        let positive = sigmoid(z);

        let class_index = if z > 0.0 {
            self.config.classes[1]
        } else {
            self.config.classes[0]
        };

        Ok(ClassPrediction::new(
            class_index,
            vec![1.0 - positive, positive],
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
