//! Threshold sweeps and the curves derived from them.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::confusion::{check_lengths, ConfusionMatrix};
use crate::error::Result;

/// Number of points in [`default_thresholds`].
pub const DEFAULT_THRESHOLD_STEPS: usize = 11;

/// Thresholds `0.0, 0.1, .., 1.0`, each computed as `i / 10`.
pub fn default_thresholds() -> Vec<f64> {
    (0..DEFAULT_THRESHOLD_STEPS).map(|i| i as f64 / 10.0).collect()
}

/// Confusion matrices of one score vector at several thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSweep {
    points: Vec<ConfusionMatrix>,
}

impl ThresholdSweep {
    /// Evaluate `scores` against `labels` at every threshold, in the given order.
    pub fn compute(
        scores: ArrayView1<'_, f64>,
        labels: ArrayView1<'_, f64>,
        thresholds: &[f64],
    ) -> Result<Self> {
        check_lengths(scores, labels)?;
        let points = thresholds
            .iter()
            .map(|&t| ConfusionMatrix::at_threshold(scores, labels, t))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { points })
    }

    /// Sweep over [`default_thresholds`].
    pub fn with_default_thresholds(
        scores: ArrayView1<'_, f64>,
        labels: ArrayView1<'_, f64>,
    ) -> Result<Self> {
        Self::compute(scores, labels, &default_thresholds())
    }

    pub fn points(&self) -> &[ConfusionMatrix] {
        &self.points
    }

    /// `(fpr, tpr)` per threshold.
    pub fn roc_curve(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|cm| (cm.fpr(), cm.tpr())).collect()
    }

    /// `(recall, precision)` per threshold.
    pub fn pr_curve(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|cm| (cm.recall(), cm.precision())).collect()
    }

    /// `(threshold, accuracy)` per threshold.
    pub fn accuracy_curve(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|cm| (cm.threshold, cm.accuracy())).collect()
    }

    /// Area under the ROC points by the trapezoid rule.
    ///
    /// Only the swept points are used; no `(0, 0)` / `(1, 1)` end points are
    /// added. Points are ordered by fpr, then tpr.
    pub fn roc_auc(&self) -> f64 {
        let mut roc = self.roc_curve();
        roc.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        roc.windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rstest::rstest;

    #[test]
    fn default_thresholds_are_exact_tenths() {
        let t = default_thresholds();
        assert_eq!(t.len(), 11);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[3], 0.3);
        assert_eq!(t[10], 1.0);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(1.0, 0.0)]
    fn extreme_thresholds(#[case] threshold: f64, #[case] expected_recall: f64) {
        let scores = array![0.01, 0.4, 0.6, 0.99];
        let labels = array![0.0, 1.0, 0.0, 1.0];
        let sweep = ThresholdSweep::compute(scores.view(), labels.view(), &[threshold]).unwrap();
        let cm = sweep.points()[0];
        assert_eq!(cm.recall(), expected_recall);
        if threshold == 1.0 {
            assert_eq!(cm.true_positives + cm.false_positives, 0);
        }
    }

    #[test]
    fn perfect_separation_has_unit_auc() {
        let scores = array![0.05, 0.15, 0.85, 0.95];
        let labels = array![0.0, 0.0, 1.0, 1.0];
        let sweep = ThresholdSweep::with_default_thresholds(scores.view(), labels.view()).unwrap();
        assert_abs_diff_eq!(sweep.roc_auc(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inverted_scores_have_zero_auc() {
        let scores = array![0.95, 0.85, 0.15, 0.05];
        let labels = array![0.0, 0.0, 1.0, 1.0];
        let sweep = ThresholdSweep::with_default_thresholds(scores.view(), labels.view()).unwrap();
        assert_abs_diff_eq!(sweep.roc_auc(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn curves_have_one_point_per_threshold() {
        let scores = array![0.2, 0.7];
        let labels = array![0.0, 1.0];
        let sweep = ThresholdSweep::with_default_thresholds(scores.view(), labels.view()).unwrap();

        assert_eq!(sweep.roc_curve().len(), 11);
        assert_eq!(sweep.pr_curve().len(), 11);
        let acc = sweep.accuracy_curve();
        assert_eq!(acc[5], (0.5, 1.0));
        assert_eq!(acc[10], (1.0, 0.5));
    }
}
