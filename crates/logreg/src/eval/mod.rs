//! Evaluation of predicted scores against true labels.
//!
//! Every function here consumes probabilities and labels only, so it works
//! for any model. A sample is predicted positive when its score is strictly
//! above the threshold.

mod confusion;
mod histogram;
mod report;
mod sweep;

use ndarray::ArrayView1;

use crate::error::{LogRegError, Result};

pub use confusion::ConfusionMatrix;
pub use histogram::{Histogram, DEFAULT_BINS};
pub use report::{EvaluationReport, DECISION_THRESHOLD};
pub use sweep::{default_thresholds, ThresholdSweep, DEFAULT_THRESHOLD_STEPS};

/// Fraction of matching class indices; 0 for empty input.
pub fn multiclass_accuracy(
    predicted: ArrayView1<'_, usize>,
    truth: ArrayView1<'_, usize>,
) -> Result<f64> {
    if predicted.len() != truth.len() {
        return Err(LogRegError::dimension("class predictions", truth.len(), predicted.len()));
    }
    if truth.is_empty() {
        return Ok(0.0);
    }
    let correct = predicted.iter().zip(truth.iter()).filter(|(p, t)| p == t).count();
    Ok(correct as f64 / truth.len() as f64)
}
