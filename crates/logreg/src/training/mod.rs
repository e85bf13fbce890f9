//! Training infrastructure for logistic models.
//!
//! - [`LogisticTrainer`] / [`LogisticParams`]: the fixed-iteration gradient loop
//! - [`compute_gradient`] / [`GradientScaling`]: the full-batch gradient
//! - [`TrainingLogger`] / [`Verbosity`]: progress output

mod gradient;
mod logger;
mod trainer;

pub use gradient::{compute_gradient, mean_log_loss, GradientScaling};
pub use logger::{TrainingLogger, Verbosity};
pub use trainer::{LogisticParams, LogisticTrainer, TrainReport};
