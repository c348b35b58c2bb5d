//! Confidence bucketing

use veracity_core::ConfidenceTier;

/// Lowest score reported as `High`
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Lowest score reported as `Medium`
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Bucket the probability of the predicted label. Lower bounds are inclusive.
pub fn tier(score: f64) -> ConfidenceTier {
    if score >= HIGH_CONFIDENCE_THRESHOLD {
        ConfidenceTier::High
    } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    }
}
