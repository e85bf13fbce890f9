//! In-memory training set.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{LogRegError, Result};

/// Rectangular feature matrix plus one label per row.
///
/// Features are sample-major: shape `[n_samples, n_features]`. Binary labels
/// are expected in `{0.0, 1.0}`; other values are accepted as soft labels.
///
/// # Example
///
/// ```
/// use logreg::data::TrainingSet;
///
/// let data = TrainingSet::from_rows(
///     vec![vec![1.0, 2.0], vec![-1.0, -2.0]],
///     vec![1.0, 0.0],
/// ).unwrap();
///
/// assert_eq!(data.n_samples(), 2);
/// assert_eq!(data.n_features(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    features: Array2<f64>,
    labels: Array1<f64>,
}

impl TrainingSet {
    /// Create a training set from a feature matrix and labels.
    ///
    /// Fails with `DimensionMismatch` if the label count differs from the
    /// number of rows.
    pub fn new(features: Array2<f64>, labels: Array1<f64>) -> Result<Self> {
        if labels.len() != features.nrows() {
            return Err(LogRegError::dimension(
                "training labels",
                features.nrows(),
                labels.len(),
            ));
        }
        Ok(Self { features, labels })
    }

    /// Create a training set from row vectors.
    ///
    /// Every row must have the width of the first one.
    pub fn from_rows(rows: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Self> {
        let n_samples = rows.len();
        let n_features = rows.first().map_or(0, Vec::len);

        let mut flat = Vec::with_capacity(n_samples * n_features);
        for row in &rows {
            if row.len() != n_features {
                return Err(LogRegError::dimension("training row", n_features, row.len()));
            }
            flat.extend_from_slice(row);
        }

        let features = Array2::from_shape_vec((n_samples, n_features), flat)
            .map_err(|_| LogRegError::dimension("training rows", n_samples * n_features, rows.len()))?;
        Self::new(features, Array1::from(labels))
    }

    /// Number of samples (rows).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features (columns).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    /// Feature matrix `[n_samples, n_features]`.
    #[inline]
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// Labels, one per sample.
    #[inline]
    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.labels.view()
    }

    /// Feature vector of one sample.
    #[inline]
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.features.row(index)
    }

    /// Split into owned parts.
    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>) {
        (self.features, self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ndarray::array;

    #[test]
    fn new_checks_label_count() {
        let err = TrainingSet::new(array![[1.0], [2.0]], array![1.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = TrainingSet::from_rows(vec![vec![1.0, 2.0], vec![3.0]], vec![0.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            LogRegError::DimensionMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn from_rows_keeps_row_order() {
        let data = TrainingSet::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]], vec![0.0, 1.0]).unwrap();
        assert_eq!(data.row(1), array![3.0, 4.0]);
        assert_eq!(data.labels(), array![0.0, 1.0]);
    }

    #[test]
    fn from_rows_empty_is_allowed() {
        let data = TrainingSet::from_rows(vec![], vec![]).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.n_features(), 0);
    }
}
