//! Classifier trait and common types

use sprs::CsVec;
use veracity_core::Result;

/// Trait for all classifiers
pub trait Classifier: Send + Sync {
    /// Score a single vectorized document
    fn predict(&self, input: &CsVec<f64>) -> Result<ClassPrediction>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Raw classifier output for one document
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPrediction {
    /// Predicted class index
    pub class_index: usize,

    /// Per-class probabilities, indexed by class
    pub probabilities: Vec<f64>,
}

impl ClassPrediction {
    /// Create a new class prediction
    pub fn new(class_index: usize, probabilities: Vec<f64>) -> Self {
        Self {
            class_index,
            probabilities,
        }
    }
}
