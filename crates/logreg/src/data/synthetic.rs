//! Seeded synthetic datasets.
//!
//! All generators are deterministic for a given seed.

use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand_distr::{Normal, Uniform};

use super::TrainingSet;

/// Default number of events for [`threshold_events`].
pub const DEFAULT_EVENTS: usize = 1000;
/// Default number of samples for [`gaussian_blobs`].
pub const DEFAULT_SAMPLES: usize = 500;
/// Default feature count for [`gaussian_blobs`].
pub const DEFAULT_FEATURES: usize = 4;

/// Two Gaussian classes, separable in every feature.
///
/// The first `n_samples / 2` rows are signal: each feature drawn from
/// `N(+2, 1)`, label `1.0`. The remaining rows are background: `N(-2, 1)`,
/// label `0.0`.
pub fn gaussian_blobs(n_samples: usize, n_features: usize, seed: u64) -> TrainingSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let signal = Normal::new(2.0, 1.0).expect("valid normal parameters");
    let background = Normal::new(-2.0, 1.0).expect("valid normal parameters");

    let n_signal = n_samples / 2;
    let mut features = Array2::zeros((n_samples, n_features));
    let mut labels = Array1::zeros(n_samples);

    for (i, mut row) in features.outer_iter_mut().enumerate() {
        let (dist, label) = if i < n_signal {
            (&signal, 1.0)
        } else {
            (&background, 0.0)
        };
        for value in row.iter_mut() {
            *value = dist.sample(&mut rng);
        }
        labels[i] = label;
    }

    TrainingSet::new(features, labels).expect("labels sized to rows")
}

/// Four uniform features in `[-5, 5)`; the label is `1.0` iff the first
/// feature exceeds `1.0`.
pub fn threshold_events(n_events: usize, seed: u64) -> TrainingSet {
    const N_FEATURES: usize = 4;
    const CUT: f64 = 1.0;

    let mut rng = StdRng::seed_from_u64(seed);
    let uniform = Uniform::new(-5.0, 5.0);

    let features = Array2::from_shape_simple_fn((n_events, N_FEATURES), || uniform.sample(&mut rng));
    let labels = features
        .column(0)
        .mapv(|x| if x > CUT { 1.0 } else { 0.0 });

    TrainingSet::new(features, labels).expect("labels sized to rows")
}

/// `n_classes` Gaussian clusters with unit variance.
///
/// Class `c` is centred at `4c - 2(n_classes - 1)` in every feature, so the
/// centres are 4 apart and symmetric around zero. Rows are assigned to classes
/// round-robin. Returns the features and the class index of every row.
pub fn multiclass_blobs(
    n_samples: usize,
    n_features: usize,
    n_classes: usize,
    seed: u64,
) -> (Array2<f64>, Array1<usize>) {
    assert!(n_classes >= 1, "need at least one class");

    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).expect("valid normal parameters");
    let offset = 2.0 * (n_classes as f64 - 1.0);

    let classes = Array1::from_shape_fn(n_samples, |i| i % n_classes);
    let mut features = Array2::zeros((n_samples, n_features));
    for (mut row, &class) in features.outer_iter_mut().zip(classes.iter()) {
        let centre = 4.0 * class as f64 - offset;
        for value in row.iter_mut() {
            *value = centre + noise.sample(&mut rng);
        }
    }

    (features, classes)
}
