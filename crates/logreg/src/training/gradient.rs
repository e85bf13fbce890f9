//! Full-batch gradient of the log-likelihood.
//!
//! The gradient follows the ascent convention: for every sample
//! `error_i = y_i - sigmoid(z_i)`, the bias component accumulates `error_i`
//! and weight `j` accumulates `error_i * x_ij`. Adding `learning_rate * grad`
//! to the parameters increases the likelihood.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::{LogRegError, Result};
use crate::utils::{log_loss, margin, sigmoid};

/// How the summed per-sample contributions are scaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientScaling {
    /// Plain sum over the batch.
    #[default]
    Sum,
    /// Sum divided by the number of samples.
    Mean,
}

/// Gradient of the log-likelihood at `parameters`.
///
/// `parameters` is laid out as `[bias, w_0, .., w_{d-1}]`; `features` has shape
/// `[n_samples, d]` and `labels` one entry per sample. Returns a vector of the
/// same length as `parameters`. An empty batch yields a zero gradient.
///
/// # Errors
///
/// `DimensionMismatch` if `features.ncols() + 1 != parameters.len()` or
/// `labels.len() != features.nrows()`.
///
/// # Example
///
/// ```
/// use logreg::training::{compute_gradient, GradientScaling};
/// use ndarray::array;
///
/// let params = array![0.0, 0.0];
/// let x = array![[1.0], [-1.0]];
/// let y = array![1.0, 0.0];
///
/// let grad = compute_gradient(params.view(), x.view(), y.view(), GradientScaling::Sum).unwrap();
/// assert_eq!(grad, array![0.0, 1.0]);
/// ```
pub fn compute_gradient(
    parameters: ArrayView1<'_, f64>,
    features: ArrayView2<'_, f64>,
    labels: ArrayView1<'_, f64>,
    scaling: GradientScaling,
) -> Result<Array1<f64>> {
    check_shapes(parameters, features, labels)?;
    let mut grad = Array1::zeros(parameters.len());
    accumulate_gradient(parameters, features, labels, scaling, &mut grad);
    Ok(grad)
}

/// Mean log-loss of the model at `parameters` over a batch.
///
/// Returns `0.0` for an empty batch.
pub fn mean_log_loss(
    parameters: ArrayView1<'_, f64>,
    features: ArrayView2<'_, f64>,
    labels: ArrayView1<'_, f64>,
) -> Result<f64> {
    check_shapes(parameters, features, labels)?;
    Ok(batch_log_loss(parameters, features, labels))
}

/// Overwrite `grad` with the gradient. Shapes are not checked.
pub(crate) fn accumulate_gradient(
    parameters: ArrayView1<'_, f64>,
    features: ArrayView2<'_, f64>,
    labels: ArrayView1<'_, f64>,
    scaling: GradientScaling,
    grad: &mut Array1<f64>,
) {
    debug_assert_eq!(grad.len(), parameters.len());
    grad.fill(0.0);

    for (row, &label) in features.outer_iter().zip(labels.iter()) {
        let error = label - sigmoid(margin(parameters, row));
        grad[0] += error;
        for (g, &x) in grad.iter_mut().skip(1).zip(row.iter()) {
            *g += error * x;
        }
    }

    if scaling == GradientScaling::Mean && features.nrows() > 0 {
        let n = features.nrows() as f64;
        grad.mapv_inplace(|g| g / n);
    }
}

/// Mean log-loss. Shapes are not checked.
pub(crate) fn batch_log_loss(
    parameters: ArrayView1<'_, f64>,
    features: ArrayView2<'_, f64>,
    labels: ArrayView1<'_, f64>,
) -> f64 {
    let n = features.nrows();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = features
        .outer_iter()
        .zip(labels.iter())
        .map(|(row, &label)| log_loss(sigmoid(margin(parameters, row)), label))
        .sum();
    total / n as f64
}

fn check_shapes(
    parameters: ArrayView1<'_, f64>,
    features: ArrayView2<'_, f64>,
    labels: ArrayView1<'_, f64>,
) -> Result<()> {
    if features.ncols() + 1 != parameters.len() {
        return Err(LogRegError::dimension(
            "gradient parameters",
            features.ncols() + 1,
            parameters.len(),
        ));
    }
    if labels.len() != features.nrows() {
        return Err(LogRegError::dimension(
            "gradient labels",
            features.nrows(),
            labels.len(),
        ));
    }
    Ok(())
}
