//! Shared numeric helpers.

use ndarray::ArrayView1;

/// Smallest value [`sigmoid`] returns.
pub const SIGMOID_MIN: f64 = f64::MIN_POSITIVE;

/// Largest value [`sigmoid`] returns, the last `f64` below 1.
pub const SIGMOID_MAX: f64 = 1.0 - f64::EPSILON / 2.0;

/// Logistic function `1 / (1 + e^-z)`, kept strictly inside `(0, 1)`.
///
/// Evaluated in the split form so `exp` never overflows: for negative `z`
/// the equivalent `e^z / (1 + e^z)` is used. Saturated results are pinned to
/// [`SIGMOID_MIN`] / [`SIGMOID_MAX`].
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    let p = if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    };
    p.clamp(SIGMOID_MIN, SIGMOID_MAX)
}

/// Affine score `bias + Σ_j w_j · x_j` for a parameter vector laid out as
/// `[bias, w_0, .., w_{d-1}]`.
///
/// Callers are responsible for `parameters.len() == features.len() + 1`.
#[inline]
pub(crate) fn margin(parameters: ArrayView1<'_, f64>, features: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(parameters.len(), features.len() + 1);
    parameters[0]
        + parameters
            .iter()
            .skip(1)
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
}

/// Binary cross-entropy of one probability against one label.
///
/// `p` is clamped away from 0 and 1 so the loss stays finite.
#[inline]
pub(crate) fn log_loss(p: f64, label: f64) -> f64 {
    const EPS: f64 = 1e-15;
    let p = p.clamp(EPS, 1.0 - EPS);
    -(label * p.ln() + (1.0 - label) * (1.0 - p).ln())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn sigmoid_zero_is_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_never_saturates() {
        for z in [-1000.0, -800.0, -745.0, -500.0, 36.8, 40.0, 500.0, 1000.0, f64::INFINITY, f64::NEG_INFINITY] {
            let p = sigmoid(z);
            assert!(p > 0.0 && p < 1.0, "sigmoid({z}) = {p}");
        }
        assert_eq!(sigmoid(1000.0), SIGMOID_MAX);
        assert_eq!(sigmoid(-1000.0), SIGMOID_MIN);
    }

    #[test]
    fn sigmoid_is_symmetric() {
        for z in [0.1, 1.0, 2.5, 10.0] {
            assert_abs_diff_eq!(sigmoid(z) + sigmoid(-z), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn margin_uses_bias_first_layout() {
        let params = array![0.5, 1.0, -2.0];
        let x = array![3.0, 1.0];
        assert_abs_diff_eq!(margin(params.view(), x.view()), 0.5 + 3.0 - 2.0);
    }

    #[test]
    fn log_loss_is_finite_at_extremes() {
        assert!(log_loss(0.0, 1.0).is_finite());
        assert!(log_loss(1.0, 0.0).is_finite());
        assert_abs_diff_eq!(log_loss(0.5, 1.0), std::f64::consts::LN_2, epsilon = 1e-12);
    }
}
