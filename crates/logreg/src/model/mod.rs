//! Model types.
//!
//! - [`LogisticModel`]: binary logistic regression (bias + one weight per feature)
//! - [`OneVsRest`]: one binary model per class
//! - [`LogisticConfig`]: validated training configuration
//!
//! # Example
//!
//! ```no_run
//! use logreg::data::synthetic::gaussian_blobs;
//! use logreg::model::{LogisticConfig, LogisticModel};
//!
//! let data = gaussian_blobs(500, 4, 42);
//! let config = LogisticConfig::builder().max_iter(1000).learning_rate(0.01).build()?;
//!
//! let mut model = LogisticModel::new(4);
//! model.train(&data, &config.to_trainer_params())?;
//!
//! model.save("logistic_model.lgrg")?;
//! model.export_weights("logistic_model.txt")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod logistic;
mod one_vs_rest;

pub use config::{ConfigError, LogisticConfig, LogisticConfigBuilder};
pub use logistic::LogisticModel;
pub use one_vs_rest::OneVsRest;
