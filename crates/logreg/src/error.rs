//! Crate-wide error type.
//!
//! Every fallible operation returns [`LogRegError`]. Callers that only care
//! about the failure class can match on [`LogRegError::kind`].

use std::path::PathBuf;

use thiserror::Error;

use crate::io::{DeserializeError, SerializeError};
use crate::model::ConfigError;

/// Coarse failure class of a [`LogRegError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A feature vector, label vector, or parameter vector has the wrong length.
    DimensionMismatch,
    /// Training was requested on zero samples or zero features.
    EmptyDataset,
    /// An artifact could not be created or written.
    ArtifactUnwritable,
    /// An artifact could not be opened or read.
    ArtifactNotFound,
    /// An artifact was read but its content is malformed.
    ArtifactCorrupt,
    /// A hyperparameter or constructor argument is out of range.
    InvalidParameter,
    /// A class label is outside the declared class range.
    InvalidLabel,
    /// A required column is absent from a table.
    MissingColumn,
}

/// Errors raised by models, trainers, artifacts and evaluation.
#[derive(Debug, Error)]
pub enum LogRegError {
    /// Vector or matrix length disagrees with what the operation requires.
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// Training set has no samples or no features.
    #[error("empty training set: {n_samples} samples, {n_features} features")]
    EmptyDataset { n_samples: usize, n_features: usize },

    /// Destination could not be written. Nothing was left behind at `path`.
    #[error("cannot write artifact {}: {source}", path.display())]
    ArtifactUnwritable {
        path: PathBuf,
        #[source]
        source: SerializeError,
    },

    /// Source could not be opened or read.
    #[error("cannot read artifact {}: {source}", path.display())]
    ArtifactNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact content failed validation or decoding.
    #[error("corrupt artifact: {0}")]
    ArtifactCorrupt(#[from] DeserializeError),

    /// Hyperparameter validation failed.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Class index outside `0..n_classes`.
    #[error("label {label} at row {row} is outside 0..{n_classes}")]
    InvalidLabel {
        row: usize,
        label: usize,
        n_classes: usize,
    },

    /// Column lookup by name failed.
    #[error("missing column '{0}'")]
    MissingColumn(String),
}

impl LogRegError {
    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::EmptyDataset { .. } => ErrorKind::EmptyDataset,
            Self::ArtifactUnwritable { .. } => ErrorKind::ArtifactUnwritable,
            Self::ArtifactNotFound { .. } => ErrorKind::ArtifactNotFound,
            Self::ArtifactCorrupt(_) => ErrorKind::ArtifactCorrupt,
            Self::Config(_) => ErrorKind::InvalidParameter,
            Self::InvalidLabel { .. } => ErrorKind::InvalidLabel,
            Self::MissingColumn(_) => ErrorKind::MissingColumn,
        }
    }

    pub(crate) fn dimension(context: &'static str, expected: usize, got: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            got,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogRegError>;
