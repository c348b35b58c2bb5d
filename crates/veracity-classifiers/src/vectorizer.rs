//! Vectorizer trait

use sprs::CsVec;
use veracity_core::Result;

/// Maps raw text into the classifier's numeric space.
///
/// Implementations are fitted offline and immutable once loaded, so a single
/// instance can serve concurrent requests without locking.
pub trait Vectorizer: Send + Sync {
    /// Vectorize one document into a sparse row of `num_features()` columns
    fn vectorize(&self, text: &str) -> Result<CsVec<f64>>;

    /// Output dimension
    fn num_features(&self) -> usize;

    /// Get the vectorizer name
    fn name(&self) -> &str;
}
