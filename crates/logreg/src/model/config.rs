//! High-level training configuration with builder pattern.
//!
//! [`LogisticConfig`] uses the `bon` crate for builder generation and
//! validates its values when built.
//!
//! # Example
//!
//! ```
//! use logreg::model::LogisticConfig;
//! use logreg::training::Verbosity;
//!
//! // All defaults: 1000 iterations, learning rate 0.01
//! let config = LogisticConfig::builder().build().unwrap();
//! assert_eq!(config.max_iter, 1000);
//!
//! let config = LogisticConfig::builder()
//!     .max_iter(200)
//!     .learning_rate(0.05)
//!     .verbosity(Verbosity::Info)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;

use crate::training::{GradientScaling, LogisticParams, Verbosity};

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Learning rate must be finite and positive.
    InvalidLearningRate(f64),
    /// One-vs-rest needs at least two classes.
    InvalidClassCount(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLearningRate(v) => {
                write!(f, "learning_rate must be finite and positive, got {}", v)
            }
            Self::InvalidClassCount(n) => write!(f, "n_classes must be at least 2, got {}", n),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// LogisticConfig
// =============================================================================

/// Configuration for training a logistic model.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct LogisticConfig {
    /// Number of gradient steps. Default: 1000. `0` leaves the parameters at zero.
    #[builder(default = 1000)]
    pub max_iter: usize,

    /// Gradient step size. Default: 0.01.
    #[builder(default = 0.01)]
    pub learning_rate: f64,

    /// Sum or mean of per-sample contributions. Default: `Sum`.
    #[builder(default)]
    pub gradient_scaling: GradientScaling,

    /// Keep the per-iteration loss history. Default: false.
    #[builder(default)]
    pub record_loss: bool,

    /// Loss logging interval at `Info` verbosity. Default: 100.
    #[builder(default = 100)]
    pub log_every: usize,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: logistic_config_builder::IsComplete> LogisticConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLearningRate`] if the learning rate is
    /// not finite or not positive.
    pub fn build(self) -> Result<LogisticConfig, ConfigError> {
        let config = self.__build_internal();
        config.to_trainer_params().validate()?;
        Ok(config)
    }
}

impl LogisticConfig {
    /// Convert to the parameters consumed by the trainer.
    pub fn to_trainer_params(&self) -> LogisticParams {
        LogisticParams {
            max_iter: self.max_iter,
            learning_rate: self.learning_rate,
            gradient_scaling: self.gradient_scaling,
            record_loss: self.record_loss,
            log_every: self.log_every,
            verbosity: self.verbosity,
        }
    }
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

impl From<LogisticConfig> for LogisticParams {
    fn from(config: LogisticConfig) -> Self {
        config.to_trainer_params()
    }
}
