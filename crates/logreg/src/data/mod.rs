//! Data handling: training sets, synthetic generators, and tables.
//!
//! - [`TrainingSet`]: feature matrix plus labels, the input of training
//! - [`synthetic`]: seeded dataset generators
//! - [`Table`]: named columns, the persisted form of a dataset

mod dataset;
pub mod synthetic;
mod table;

pub use dataset::TrainingSet;
pub use table::{feature_column_name, Column, Table, LABEL_COLUMN};
