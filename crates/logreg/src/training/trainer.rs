//! Full-batch gradient trainer for logistic models.

use std::path::Path;

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::data::TrainingSet;
use crate::error::{LogRegError, Result};
use crate::io::write_atomic;
use crate::model::{ConfigError, LogisticModel};

use super::gradient::{accumulate_gradient, batch_log_loss, GradientScaling};
use super::logger::{TrainingLogger, Verbosity};

// ============================================================================
// LogisticParams
// ============================================================================

/// Parameters for logistic training.
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticParams {
    /// Number of gradient steps. Every step is always taken.
    pub max_iter: usize,

    /// Step size applied to the gradient.
    pub learning_rate: f64,

    /// Whether the gradient is summed or averaged over the batch.
    pub gradient_scaling: GradientScaling,

    /// Record the mean log-loss after every step in [`TrainReport::loss_history`].
    pub record_loss: bool,

    /// Log the loss every this many steps when verbosity is at least `Info`.
    /// `0` disables periodic logging.
    pub log_every: usize,

    /// Verbosity level for training output.
    pub verbosity: Verbosity,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            learning_rate: 0.01,
            gradient_scaling: GradientScaling::Sum,
            record_loss: false,
            log_every: 100,
            verbosity: Verbosity::default(),
        }
    }
}

impl LogisticParams {
    /// Check that the learning rate is finite and positive.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }
}

// ============================================================================
// TrainReport
// ============================================================================

/// Summary of a training run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainReport {
    /// Gradient steps taken.
    pub n_iterations: usize,
    /// Mean log-loss after each step. Empty unless `record_loss` was set.
    pub loss_history: Vec<f64>,
}

impl TrainReport {
    /// Loss after the last step, if recorded.
    pub fn final_loss(&self) -> Option<f64> {
        self.loss_history.last().copied()
    }

    /// Write the loss history as a JSON array, replacing any existing file.
    pub fn write_loss_curve(&self, path: impl AsRef<Path>) -> Result<()> {
        write_atomic(path.as_ref(), |w| {
            serde_json::to_writer_pretty(&mut *w, &self.loss_history)?;
            w.write_all(b"\n")
        })
    }
}

// ============================================================================
// LogisticTrainer
// ============================================================================

/// Trains a [`LogisticModel`] by fixed-length gradient ascent.
///
/// Each of the `max_iter` steps computes the full-batch gradient and adds
/// `learning_rate * grad` to every parameter. There is no convergence check
/// and no shuffling, so training is deterministic.
///
/// # Example
///
/// ```
/// use logreg::{LogisticParams, LogisticTrainer, TrainingSet};
///
/// let data = TrainingSet::from_rows(vec![vec![1.0], vec![-1.0]], vec![1.0, 0.0]).unwrap();
/// let trainer = LogisticTrainer::new(LogisticParams {
///     max_iter: 1,
///     learning_rate: 1.0,
///     ..Default::default()
/// });
///
/// let model = trainer.train(&data).unwrap();
/// assert_eq!(model.parameters().to_vec(), vec![0.0, 1.0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LogisticTrainer {
    params: LogisticParams,
}

impl LogisticTrainer {
    pub fn new(params: LogisticParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LogisticParams {
        &self.params
    }

    /// Train a fresh model on a training set.
    pub fn train(&self, data: &TrainingSet) -> Result<LogisticModel> {
        self.fit(data.features(), data.labels()).map(|(model, _)| model)
    }

    /// Train a fresh model and return the run summary alongside it.
    pub fn train_with_report(&self, data: &TrainingSet) -> Result<(LogisticModel, TrainReport)> {
        self.fit(data.features(), data.labels())
    }

    /// Train on a feature matrix `[n_samples, n_features]` and labels.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the parameters fail [`LogisticParams::validate`]
    /// - `EmptyDataset` for zero samples or zero features
    /// - `DimensionMismatch` if `labels.len() != features.nrows()`
    pub fn fit(
        &self,
        features: ArrayView2<'_, f64>,
        labels: ArrayView1<'_, f64>,
    ) -> Result<(LogisticModel, TrainReport)> {
        self.params.validate()?;

        let (n_samples, n_features) = features.dim();
        if n_samples == 0 || n_features == 0 {
            return Err(LogRegError::EmptyDataset {
                n_samples,
                n_features,
            });
        }
        if labels.len() != n_samples {
            return Err(LogRegError::dimension("training labels", n_samples, labels.len()));
        }

        let mut logger = TrainingLogger::new(self.params.verbosity);
        if labels.iter().any(|&y| y != 0.0 && y != 1.0) {
            logger.log_warning("labels outside {0, 1} are treated as soft targets");
        }
        logger.start_training(self.params.max_iter, n_samples, n_features);
        logger.log_debug(format_args!(
            "learning rate {}, {:?} gradient scaling",
            self.params.learning_rate, self.params.gradient_scaling
        ));

        let lr = self.params.learning_rate;
        let track_loss = self.params.record_loss || logger.enabled(Verbosity::Info);

        let mut parameters = Array1::zeros(n_features + 1);
        let mut grad = Array1::zeros(n_features + 1);
        let mut report = TrainReport::default();
        let mut last_loss = None;

        for iter in 1..=self.params.max_iter {
            accumulate_gradient(
                parameters.view(),
                features,
                labels,
                self.params.gradient_scaling,
                &mut grad,
            );
            parameters.scaled_add(lr, &grad);
            report.n_iterations = iter;

            if !track_loss {
                continue;
            }
            let periodic = self.params.log_every > 0 && iter % self.params.log_every == 0;
            if !self.params.record_loss && !periodic {
                continue;
            }

            let loss = batch_log_loss(parameters.view(), features, labels);
            last_loss = Some(loss);
            if self.params.record_loss {
                report.loss_history.push(loss);
            }
            if periodic {
                logger.log_iteration(iter, loss);
            }
        }

        logger.finish_training(last_loss);

        let model = LogisticModel::from_trained(parameters, report.n_iterations);
        Ok((model, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    fn one_feature_set() -> TrainingSet {
        TrainingSet::from_rows(vec![vec![1.0], vec![-1.0]], vec![1.0, 0.0]).unwrap()
    }

    #[test]
    fn default_params() {
        let params = LogisticParams::default();
        assert_eq!(params.max_iter, 1000);
        assert_eq!(params.learning_rate, 0.01);
        assert_eq!(params.gradient_scaling, GradientScaling::Sum);
        assert_eq!(params.verbosity, Verbosity::Silent);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn single_step_matches_hand_computation() {
        let trainer = LogisticTrainer::new(LogisticParams {
            max_iter: 1,
            learning_rate: 1.0,
            ..Default::default()
        });
        let model = trainer.train(&one_feature_set()).unwrap();
        assert_abs_diff_eq!(model.parameters()[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(model.parameters()[1], 1.0, epsilon = 1e-12);
        assert_eq!(model.n_iterations(), 1);
    }

    #[test]
    fn zero_iterations_keep_zero_parameters() {
        let trainer = LogisticTrainer::new(LogisticParams {
            max_iter: 0,
            ..Default::default()
        });
        let model = trainer.train(&one_feature_set()).unwrap();
        assert_eq!(model.parameters().to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn records_monotone_loss_on_separable_data() {
        let trainer = LogisticTrainer::new(LogisticParams {
            max_iter: 50,
            learning_rate: 0.1,
            record_loss: true,
            ..Default::default()
        });
        let (_, report) = trainer.train_with_report(&one_feature_set()).unwrap();

        assert_eq!(report.n_iterations, 50);
        assert_eq!(report.loss_history.len(), 50);
        assert!(report.loss_history.windows(2).all(|w| w[1] <= w[0]));
        assert!(report.final_loss().unwrap() < std::f64::consts::LN_2);
    }

    #[test]
    fn loss_is_not_recorded_by_default() {
        let (_, report) = LogisticTrainer::default()
            .train_with_report(&one_feature_set())
            .unwrap();
        assert!(report.loss_history.is_empty());
        assert_eq!(report.n_iterations, 1000);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let trainer = LogisticTrainer::default();

        let no_rows = Array2::<f64>::zeros((0, 3));
        let err = trainer.fit(no_rows.view(), Array1::zeros(0).view()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyDataset);

        let no_cols = Array2::<f64>::zeros((3, 0));
        let err = trainer.fit(no_cols.view(), array![0.0, 1.0, 0.0].view()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyDataset);
    }

    #[test]
    fn invalid_learning_rate_is_rejected() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let trainer = LogisticTrainer::new(LogisticParams {
                learning_rate: lr,
                ..Default::default()
            });
            let err = trainer.train(&one_feature_set()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        }
    }

    #[test]
    fn loss_curve_is_written_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loss.json");
        let report = TrainReport {
            n_iterations: 3,
            loss_history: vec![0.5, 0.25, 0.125],
        };

        report.write_loss_curve(&path).unwrap();
        let written: Vec<f64> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, report.loss_history);

        let missing = dir.path().join("no/such/dir/loss.json");
        let err = report.write_loss_curve(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArtifactUnwritable);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn label_count_mismatch() {
        let x = array![[1.0], [2.0]];
        let err = LogisticTrainer::default()
            .fit(x.view(), array![1.0].view())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }
}
