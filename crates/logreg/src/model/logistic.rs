//! Binary logistic regression model.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::data::TrainingSet;
use crate::error::{LogRegError, Result};
use crate::training::{LogisticParams, LogisticTrainer, TrainReport};
use crate::utils::{margin, sigmoid};

/// Logistic model: a bias plus one weight per feature.
///
/// Parameters are stored as a single vector laid out as
/// `[bias, w_0, .., w_{n_features - 1}]`. The model predicts
/// `P(label = 1 | x) = sigmoid(bias + Σ w_j x_j)`.
///
/// # Example
///
/// ```
/// use logreg::LogisticModel;
/// use ndarray::array;
///
/// let model = LogisticModel::from_parameters(array![0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
/// let p = model.predict(&[2.0, 0.0, 0.0, 0.0]).unwrap();
/// assert!((p - 0.8808).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    parameters: Array1<f64>,
    n_iterations: usize,
}

impl LogisticModel {
    /// Create an untrained model with all parameters zero.
    pub fn new(n_features: usize) -> Self {
        Self {
            parameters: Array1::zeros(n_features + 1),
            n_iterations: 0,
        }
    }

    /// Create a model from a parameter vector, bias first.
    ///
    /// Fails with `DimensionMismatch` for an empty vector.
    pub fn from_parameters(parameters: Array1<f64>) -> Result<Self> {
        if parameters.is_empty() {
            return Err(LogRegError::dimension("model parameters", 1, 0));
        }
        Ok(Self {
            parameters,
            n_iterations: 0,
        })
    }

    pub(crate) fn from_trained(parameters: Array1<f64>, n_iterations: usize) -> Self {
        debug_assert!(!parameters.is_empty());
        Self {
            parameters,
            n_iterations,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.parameters.len() - 1
    }

    /// Full parameter vector `[bias, w_0, ..]`.
    #[inline]
    pub fn parameters(&self) -> ArrayView1<'_, f64> {
        self.parameters.view()
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.parameters[0]
    }

    /// Feature weights, without the bias.
    #[inline]
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.parameters.slice(ndarray::s![1..])
    }

    /// Gradient steps that produced the current parameters.
    #[inline]
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Raw score `bias + Σ w_j x_j`.
    pub fn predict_margin(&self, features: &[f64]) -> Result<f64> {
        self.check_width("prediction features", features.len())?;
        Ok(margin(self.parameters.view(), ArrayView1::from(features)))
    }

    /// Probability that the label is 1.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `features.len() != n_features()`.
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        self.predict_margin(features).map(sigmoid)
    }

    /// Probability per row of a `[n_samples, n_features]` matrix.
    pub fn predict_batch(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        self.check_width("prediction matrix", features.ncols())?;
        let params = self.parameters.view();
        Ok(features
            .outer_iter()
            .map(|row| sigmoid(margin(params, row)))
            .collect())
    }

    fn check_width(&self, context: &'static str, got: usize) -> Result<()> {
        if got != self.n_features() {
            return Err(LogRegError::dimension(context, self.n_features(), got));
        }
        Ok(())
    }

    // =========================================================================
    // Training
    // =========================================================================

    /// Retrain from zero on `data`.
    ///
    /// The parameter vector is re-sized to `data.n_features() + 1` regardless
    /// of its previous length. On error the model keeps its previous parameters.
    pub fn train(&mut self, data: &TrainingSet, params: &LogisticParams) -> Result<TrainReport> {
        let (trained, report) = LogisticTrainer::new(params.clone()).train_with_report(data)?;
        *self = trained;
        Ok(report)
    }
}
