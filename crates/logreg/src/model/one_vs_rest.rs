//! One-vs-rest multi-class wrapper around binary logistic models.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::{ConfigError, LogisticModel};
use crate::error::{LogRegError, Result};
use crate::training::{LogisticParams, LogisticTrainer};

/// One independent binary [`LogisticModel`] per class.
///
/// Model `k` is trained to separate class `k` from every other class. The
/// per-class scores are plain sigmoid outputs and do not sum to one; the
/// predicted class is the one with the highest score (lowest index on ties).
#[derive(Debug, Clone, PartialEq)]
pub struct OneVsRest {
    models: Vec<LogisticModel>,
}

impl OneVsRest {
    /// Train one model per class.
    ///
    /// `classes` holds the class index of every row of `features`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `n_classes < 2` or the params are invalid
    /// - `DimensionMismatch` if `classes.len() != features.nrows()`
    /// - `InvalidLabel` for a class index `>= n_classes`
    /// - `EmptyDataset` for zero samples or zero features
    pub fn train(
        features: ArrayView2<'_, f64>,
        classes: ArrayView1<'_, usize>,
        n_classes: usize,
        params: &LogisticParams,
    ) -> Result<Self> {
        if n_classes < 2 {
            return Err(ConfigError::InvalidClassCount(n_classes).into());
        }
        if classes.len() != features.nrows() {
            return Err(LogRegError::dimension(
                "class labels",
                features.nrows(),
                classes.len(),
            ));
        }
        if let Some((row, &label)) = classes.iter().enumerate().find(|&(_, &c)| c >= n_classes) {
            return Err(LogRegError::InvalidLabel {
                row,
                label,
                n_classes,
            });
        }

        let trainer = LogisticTrainer::new(params.clone());
        let models = (0..n_classes)
            .map(|k| {
                let labels: Array1<f64> = classes.mapv(|c| if c == k { 1.0 } else { 0.0 });
                trainer.fit(features, labels.view()).map(|(model, _)| model)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { models })
    }

    /// Assemble from per-class models, in class order.
    ///
    /// Needs at least two models, all with the same feature count.
    pub fn from_models(models: Vec<LogisticModel>) -> Result<Self> {
        if models.len() < 2 {
            return Err(ConfigError::InvalidClassCount(models.len()).into());
        }
        let n_features = models[0].n_features();
        if let Some(m) = models.iter().find(|m| m.n_features() != n_features) {
            return Err(LogRegError::dimension(
                "one-vs-rest member features",
                n_features,
                m.n_features(),
            ));
        }
        Ok(Self { models })
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.models.len()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.models[0].n_features()
    }

    /// Per-class models, in class order.
    pub fn models(&self) -> &[LogisticModel] {
        &self.models
    }

    /// Binary score of every class for one sample.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        self.models.iter().map(|m| m.predict(features)).collect()
    }

    /// Most likely class for one sample.
    pub fn predict(&self, features: &[f64]) -> Result<usize> {
        self.predict_proba(features)
            .map(|scores| argmax(ArrayView1::from(&scores[..])))
    }

    /// Scores `[n_samples, n_classes]` for a feature matrix.
    pub fn predict_proba_batch(&self, features: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let mut out = Array2::zeros((features.nrows(), self.n_classes()));
        for (k, model) in self.models.iter().enumerate() {
            out.column_mut(k).assign(&model.predict_batch(features)?);
        }
        Ok(out)
    }

    /// Most likely class per row of a feature matrix.
    pub fn predict_batch(&self, features: ArrayView2<'_, f64>) -> Result<Array1<usize>> {
        let scores = self.predict_proba_batch(features)?;
        Ok(scores
            .outer_iter()
            .map(argmax)
            .collect())
    }
}

fn argmax(scores: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (k, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] {
            best = k;
        }
    }
    best
}
