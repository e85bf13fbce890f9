//! logreg: binary and one-vs-rest logistic regression for Rust.
//!
//! Models are trained by plain full-batch gradient ascent on the
//! log-likelihood for a fixed number of iterations.
//!
//! # Key Types
//!
//! - [`LogisticModel`] - Bias plus one weight per feature; predict/train/save/load
//! - [`OneVsRest`] - One binary model per class
//! - [`LogisticTrainer`] / [`LogisticParams`] - The training loop
//! - [`LogisticConfig`] - Validated configuration builder
//! - [`TrainingSet`] - Feature matrix plus labels
//!
//! # Training
//!
//! ```
//! use logreg::data::synthetic::gaussian_blobs;
//! use logreg::{LogisticModel, LogisticParams};
//!
//! let data = gaussian_blobs(200, 4, 42);
//! let mut model = LogisticModel::new(4);
//! model.train(&data, &LogisticParams::default()).unwrap();
//!
//! let p = model.predict(&[2.0, 2.0, 2.0, 2.0]).unwrap();
//! assert!(p > 0.9);
//! ```
//!
//! # Persistence
//!
//! Models are stored in a small binary container (see [`io::native`]) and can
//! be exported as plain text with [`LogisticModel::export_weights`].

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod error;
pub mod eval;
pub mod io;
pub mod model;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use error::{ErrorKind, LogRegError, Result};

pub use model::{ConfigError, LogisticConfig, LogisticModel, OneVsRest};

pub use training::{
    GradientScaling, LogisticParams, LogisticTrainer, TrainReport, TrainingLogger, Verbosity,
};

pub use data::TrainingSet;

pub use utils::sigmoid;
