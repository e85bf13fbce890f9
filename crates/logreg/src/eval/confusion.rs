//! Confusion matrix at a fixed decision threshold.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::error::{LogRegError, Result};

/// Counts of a binary decision rule `score > threshold` against true labels.
///
/// A label counts as positive when it is at least `0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub threshold: f64,
    pub true_positives: u64,
    pub false_positives: u64,
    pub true_negatives: u64,
    pub false_negatives: u64,
}

impl ConfusionMatrix {
    /// Classify every score as positive iff it is strictly above `threshold`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `scores` and `labels` differ in length.
    ///
    /// # Example
    ///
    /// ```
    /// use logreg::eval::ConfusionMatrix;
    /// use ndarray::array;
    ///
    /// let cm = ConfusionMatrix::at_threshold(
    ///     array![0.9, 0.6, 0.4, 0.1].view(),
    ///     array![1.0, 0.0, 1.0, 0.0].view(),
    ///     0.5,
    /// ).unwrap();
    ///
    /// assert_eq!(cm.true_positives, 1);
    /// assert_eq!(cm.false_positives, 1);
    /// assert_eq!(cm.accuracy(), 0.5);
    /// ```
    pub fn at_threshold(
        scores: ArrayView1<'_, f64>,
        labels: ArrayView1<'_, f64>,
        threshold: f64,
    ) -> Result<Self> {
        check_lengths(scores, labels)?;

        let mut cm = Self {
            threshold,
            true_positives: 0,
            false_positives: 0,
            true_negatives: 0,
            false_negatives: 0,
        };
        for (&score, &label) in scores.iter().zip(labels.iter()) {
            match (score > threshold, is_positive(label)) {
                (true, true) => cm.true_positives += 1,
                (true, false) => cm.false_positives += 1,
                (false, false) => cm.true_negatives += 1,
                (false, true) => cm.false_negatives += 1,
            }
        }
        Ok(cm)
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Fraction of correct decisions; 0 for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// `tp / (tp + fp)`; 0 when nothing was classified positive.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// `tp / (tp + fn)`; 0 when there are no positive labels.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// True positive rate, same as [`recall`](Self::recall).
    #[inline]
    pub fn tpr(&self) -> f64 {
        self.recall()
    }

    /// `fp / (fp + tn)`; 0 when there are no negative labels.
    pub fn fpr(&self) -> f64 {
        ratio(self.false_positives, self.false_positives + self.true_negatives)
    }
}

#[inline]
pub(crate) fn is_positive(label: f64) -> bool {
    label >= 0.5
}

#[inline]
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

pub(crate) fn check_lengths(scores: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> Result<()> {
    if scores.len() != labels.len() {
        return Err(LogRegError::dimension("evaluation labels", scores.len(), labels.len()));
    }
    Ok(())
}
