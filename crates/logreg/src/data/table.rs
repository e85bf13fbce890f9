//! Named-column table, the on-disk form of a dataset.
//!
//! A table stores features as `feature1 .. featureN` and labels as `label`.
//! It is persisted with [`Table::save`] / [`Table::load`] in the native
//! artifact format.

use ndarray::{Array1, Array2};

use super::TrainingSet;
use crate::error::{LogRegError, Result};

/// Name of the label column.
pub const LABEL_COLUMN: &str = "label";

/// Name of the feature column at zero-based `index` (`feature1` for 0).
pub fn feature_column_name(index: usize) -> String {
    format!("feature{}", index + 1)
}

/// One named column of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Ordered set of equally long, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    title: String,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column.
    ///
    /// The column must have the length of the existing columns. A column with
    /// an existing name replaces it.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        let replaced = self.columns.iter().position(|c| c.name == name);
        let other = self
            .columns
            .iter()
            .enumerate()
            .find(|&(i, _)| Some(i) != replaced);
        if let Some((_, column)) = other {
            if column.values.len() != values.len() {
                return Err(LogRegError::dimension("table column", column.values.len(), values.len()));
            }
        }

        match replaced {
            Some(i) => self.columns[i].values = values,
            None => self.columns.push(Column { name, values }),
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows (0 for a table without columns).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| LogRegError::MissingColumn(name.to_string()))
    }

    /// Build a table from a training set using the standard column names.
    pub fn from_training_set(title: impl Into<String>, data: &TrainingSet) -> Self {
        let mut columns: Vec<Column> = data
            .features()
            .columns()
            .into_iter()
            .enumerate()
            .map(|(j, values)| Column {
                name: feature_column_name(j),
                values: values.to_vec(),
            })
            .collect();
        columns.push(Column {
            name: LABEL_COLUMN.to_string(),
            values: data.labels().to_vec(),
        });

        Self {
            title: title.into(),
            columns,
        }
    }

    /// Assemble a training set from `feature1 .. featureN` and `label`.
    ///
    /// The table must hold exactly `n_features` feature columns; extra or
    /// missing ones are a `DimensionMismatch`.
    pub fn to_training_set(&self, n_features: usize) -> Result<TrainingSet> {
        let present = self.n_feature_columns();
        if present != n_features {
            return Err(LogRegError::dimension("table feature columns", n_features, present));
        }

        let n_rows = self.n_rows();
        let mut features = Array2::zeros((n_rows, n_features));
        for j in 0..n_features {
            let values = self.column(&feature_column_name(j))?;
            features.column_mut(j).assign(&Array1::from(values.to_vec()));
        }
        let labels = Array1::from(self.column(LABEL_COLUMN)?.to_vec());
        TrainingSet::new(features, labels)
    }

    /// Number of consecutive `feature1, feature2, ..` columns present.
    pub fn n_feature_columns(&self) -> usize {
        (0..)
            .take_while(|&j| self.column(&feature_column_name(j)).is_ok())
            .count()
    }

    pub(crate) fn from_parts(title: String, columns: Vec<Column>) -> Self {
        Self { title, columns }
    }
}
