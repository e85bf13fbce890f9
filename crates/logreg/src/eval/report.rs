//! Serializable summary of a binary classifier's performance.

use std::path::Path;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::confusion::{check_lengths, ConfusionMatrix};
use super::histogram::{Histogram, DEFAULT_BINS};
use super::sweep::ThresholdSweep;
use crate::error::Result;
use crate::io::write_atomic;

/// Decision threshold of the headline numbers.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Accuracy, confusion matrix, curves and score distribution of one
/// evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub n_samples: usize,
    /// Accuracy at [`DECISION_THRESHOLD`].
    pub accuracy: f64,
    /// Confusion matrix at [`DECISION_THRESHOLD`].
    pub confusion: ConfusionMatrix,
    /// `(fpr, tpr)` over the default thresholds.
    pub roc: Vec<(f64, f64)>,
    pub roc_auc: f64,
    /// `(recall, precision)` over the default thresholds.
    pub precision_recall: Vec<(f64, f64)>,
    /// `(threshold, accuracy)` over the default thresholds.
    pub accuracy_vs_threshold: Vec<(f64, f64)>,
    pub score_histogram: Histogram,
}

impl EvaluationReport {
    /// Evaluate predicted probabilities against binary labels.
    pub fn compute(scores: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> Result<Self> {
        check_lengths(scores, labels)?;

        let confusion = ConfusionMatrix::at_threshold(scores, labels, DECISION_THRESHOLD)?;
        let sweep = ThresholdSweep::with_default_thresholds(scores, labels)?;

        Ok(Self {
            n_samples: scores.len(),
            accuracy: confusion.accuracy(),
            confusion,
            roc: sweep.roc_curve(),
            roc_auc: sweep.roc_auc(),
            precision_recall: sweep.pr_curve(),
            accuracy_vs_threshold: sweep.accuracy_curve(),
            score_histogram: Histogram::of_scores(scores.iter(), DEFAULT_BINS),
        })
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as JSON, replacing any existing file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        write_atomic(path.as_ref(), |w| {
            serde_json::to_writer_pretty(&mut *w, self)?;
            w.write_all(b"\n")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ndarray::array;

    #[test]
    fn summarises_scores() {
        let scores = array![0.1, 0.3, 0.7, 0.9];
        let labels = array![0.0, 1.0, 1.0, 0.0];
        let report = EvaluationReport::compute(scores.view(), labels.view()).unwrap();

        assert_eq!(report.n_samples, 4);
        assert_eq!(report.accuracy, 0.5);
        assert_eq!(report.confusion.true_positives, 1);
        assert_eq!(report.roc.len(), 11);
        assert_eq!(report.score_histogram.n_entries(), 4);
    }

    #[test]
    fn json_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let scores = array![0.2, 0.8];
        let labels = array![0.0, 1.0];
        let report = EvaluationReport::compute(scores.view(), labels.view()).unwrap();

        report.write_json(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: EvaluationReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
        assert!(report.to_json().unwrap().contains("\"roc_auc\""));
    }

    #[test]
    fn length_mismatch() {
        let err = EvaluationReport::compute(array![0.5].view(), array![1.0, 0.0].view()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }
}
