//! Conversion between runtime types and payload types, plus the
//! `save`/`load` entry points built on them.
//!
//! Decoding is all-or-nothing: an artifact is fully validated before the
//! receiving object is touched.

use std::path::Path;

use ndarray::Array1;

use super::native::{ArtifactKind, DeserializeError, NativeCodec};
use super::payload::{ColumnPayload, LogisticPayload, OneVsRestPayload, Payload, PayloadV1, TablePayload};
use super::{read_artifact, text, write_atomic};
use crate::data::{Column, Table};
use crate::error::{LogRegError, Result};
use crate::model::{LogisticModel, OneVsRest};

// =============================================================================
// LogisticModel <-> LogisticPayload
// =============================================================================

impl From<&LogisticModel> for LogisticPayload {
    fn from(model: &LogisticModel) -> Self {
        Self {
            parameters: model.parameters().to_vec(),
            num_iterations: u32::try_from(model.n_iterations()).unwrap_or(u32::MAX),
        }
    }
}

impl TryFrom<LogisticPayload> for LogisticModel {
    type Error = DeserializeError;

    fn try_from(payload: LogisticPayload) -> std::result::Result<Self, Self::Error> {
        if payload.parameters.is_empty() {
            return Err(DeserializeError::CorruptPayload(
                "empty parameter vector".into(),
            ));
        }
        Ok(Self::from_trained(
            Array1::from(payload.parameters),
            payload.num_iterations as usize,
        ))
    }
}

// =============================================================================
// OneVsRest <-> OneVsRestPayload
// =============================================================================

impl From<&OneVsRest> for OneVsRestPayload {
    fn from(ovr: &OneVsRest) -> Self {
        Self {
            models: ovr.models().iter().map(LogisticPayload::from).collect(),
        }
    }
}

impl TryFrom<OneVsRestPayload> for OneVsRest {
    type Error = DeserializeError;

    fn try_from(payload: OneVsRestPayload) -> std::result::Result<Self, Self::Error> {
        let models = payload
            .models
            .into_iter()
            .map(LogisticModel::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::from_models(models).map_err(|e| DeserializeError::CorruptPayload(e.to_string()))
    }
}

// =============================================================================
// Table <-> TablePayload
// =============================================================================

impl From<&Table> for TablePayload {
    fn from(table: &Table) -> Self {
        Self {
            title: table.title().to_string(),
            columns: table
                .columns()
                .iter()
                .map(|c| ColumnPayload {
                    name: c.name.clone(),
                    values: c.values.clone(),
                })
                .collect(),
        }
    }
}

impl TryFrom<TablePayload> for Table {
    type Error = DeserializeError;

    fn try_from(payload: TablePayload) -> std::result::Result<Self, Self::Error> {
        let n_rows = payload.columns.first().map_or(0, |c| c.values.len());
        if let Some(c) = payload.columns.iter().find(|c| c.values.len() != n_rows) {
            return Err(DeserializeError::CorruptPayload(format!(
                "column '{}' has {} rows, expected {}",
                c.name,
                c.values.len(),
                n_rows
            )));
        }
        let columns = payload
            .columns
            .into_iter()
            .map(|c| Column {
                name: c.name,
                values: c.values,
            })
            .collect();
        Ok(Self::from_parts(payload.title, columns))
    }
}

// =============================================================================
// Header consistency
// =============================================================================

fn check_count(what: &str, header: u32, actual: usize) -> std::result::Result<(), DeserializeError> {
    if header as usize != actual {
        return Err(DeserializeError::CorruptPayload(format!(
            "header declares {header} {what}, payload has {actual}"
        )));
    }
    Ok(())
}

fn wrong_variant(expected: ArtifactKind) -> DeserializeError {
    DeserializeError::CorruptPayload(format!("payload does not hold a {expected:?} artifact"))
}

fn encode<T: serde::Serialize>(
    kind: ArtifactKind,
    num_features: usize,
    num_items: usize,
    payload: &T,
) -> std::result::Result<Vec<u8>, super::SerializeError> {
    NativeCodec::new().serialize(kind, num_features as u32, num_items as u32, payload)
}

// =============================================================================
// LogisticModel persistence
// =============================================================================

impl LogisticModel {
    /// Encode the model as a native artifact.
    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, super::SerializeError> {
        let payload = Payload::V1(PayloadV1::Logistic(LogisticPayload::from(self)));
        encode(ArtifactKind::Logistic, self.n_features(), 1, &payload)
    }

    /// Decode a model from a native artifact.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, payload) =
            NativeCodec::new().deserialize_kind::<Payload>(bytes, ArtifactKind::Logistic)?;
        let Payload::V1(PayloadV1::Logistic(inner)) = payload else {
            return Err(wrong_variant(ArtifactKind::Logistic).into());
        };
        let model = LogisticModel::try_from(inner)?;
        check_count("features", header.num_features, model.n_features())?;
        Ok(model)
    }

    /// Write the parameter vector to `path`, replacing any existing file.
    ///
    /// The file is written next to `path` and renamed into place, so a failed
    /// save leaves no partial artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes().map_err(|source| LogRegError::ArtifactUnwritable {
            path: path.to_path_buf(),
            source,
        })?;
        write_atomic(path, |w| w.write_all(&bytes))
    }

    /// Replace the parameters with those stored at `path`.
    ///
    /// The stored vector length is adopted. On any error the model is left
    /// unchanged.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        *self = Self::read(path)?;
        Ok(())
    }

    /// Read a model stored at `path`.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = read_artifact(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Write the parameters as text: the count, then one value per line.
    pub fn export_weights(&self, path: impl AsRef<Path>) -> Result<()> {
        text::export_weights(path, self.parameters())
    }
}

// =============================================================================
// OneVsRest persistence
// =============================================================================

impl OneVsRest {
    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, super::SerializeError> {
        let payload = Payload::V1(PayloadV1::OneVsRest(OneVsRestPayload::from(self)));
        encode(ArtifactKind::OneVsRest, self.n_features(), self.n_classes(), &payload)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, payload) =
            NativeCodec::new().deserialize_kind::<Payload>(bytes, ArtifactKind::OneVsRest)?;
        let Payload::V1(PayloadV1::OneVsRest(inner)) = payload else {
            return Err(wrong_variant(ArtifactKind::OneVsRest).into());
        };
        let ovr = OneVsRest::try_from(inner)?;
        check_count("features", header.num_features, ovr.n_features())?;
        check_count("classes", header.num_items, ovr.n_classes())?;
        Ok(ovr)
    }

    /// Save all per-class models as one artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes().map_err(|source| LogRegError::ArtifactUnwritable {
            path: path.to_path_buf(),
            source,
        })?;
        write_atomic(path, |w| w.write_all(&bytes))
    }

    /// Load a one-vs-rest artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = read_artifact(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}

// =============================================================================
// Table persistence
// =============================================================================

impl Table {
    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, super::SerializeError> {
        let payload = Payload::V1(PayloadV1::Table(TablePayload::from(self)));
        encode(ArtifactKind::Table, self.n_feature_columns(), self.n_rows(), &payload)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, payload) =
            NativeCodec::new().deserialize_kind::<Payload>(bytes, ArtifactKind::Table)?;
        let Payload::V1(PayloadV1::Table(inner)) = payload else {
            return Err(wrong_variant(ArtifactKind::Table).into());
        };
        let table = Table::try_from(inner)?;
        check_count("rows", header.num_items, table.n_rows())?;
        Ok(table)
    }

    /// Save the table, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes().map_err(|source| LogRegError::ArtifactUnwritable {
            path: path.to_path_buf(),
            source,
        })?;
        write_atomic(path, |w| w.write_all(&bytes))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = read_artifact(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::io::HEADER_SIZE;
    use ndarray::array;

    #[test]
    fn logistic_bytes_roundtrip() {
        let model = LogisticModel::from_parameters(array![0.25, -1.5, 3.0e-7]).unwrap();
        let restored = LogisticModel::from_bytes(&model.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn wrong_kind_is_corrupt() {
        let table = Table::new("t");
        let err = LogisticModel::from_bytes(&table.to_bytes().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            LogRegError::ArtifactCorrupt(DeserializeError::KindMismatch { .. })
        ));
    }

    #[test]
    fn empty_parameter_payload_is_corrupt() {
        let payload = Payload::V1(PayloadV1::Logistic(LogisticPayload {
            parameters: vec![],
            num_iterations: 0,
        }));
        let bytes = encode(ArtifactKind::Logistic, 0, 1, &payload).unwrap();
        let err = LogisticModel::from_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArtifactCorrupt);
    }

    #[test]
    fn header_feature_count_must_match() {
        let payload = Payload::V1(PayloadV1::Logistic(LogisticPayload {
            parameters: vec![0.0, 1.0],
            num_iterations: 0,
        }));
        let bytes = encode(ArtifactKind::Logistic, 5, 1, &payload).unwrap();
        let err = LogisticModel::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            LogRegError::ArtifactCorrupt(DeserializeError::CorruptPayload(_))
        ));
    }

    #[test]
    fn one_vs_rest_members_must_share_width() {
        let payload = Payload::V1(PayloadV1::OneVsRest(OneVsRestPayload {
            models: vec![
                LogisticPayload { parameters: vec![0.0, 1.0], num_iterations: 1 },
                LogisticPayload { parameters: vec![0.0, 1.0, 2.0], num_iterations: 1 },
            ],
        }));
        let bytes = encode(ArtifactKind::OneVsRest, 1, 2, &payload).unwrap();
        let err = OneVsRest::from_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArtifactCorrupt);
    }

    #[test]
    fn ragged_table_payload_is_corrupt() {
        let payload = Payload::V1(PayloadV1::Table(TablePayload {
            title: "t".into(),
            columns: vec![
                ColumnPayload { name: "feature1".into(), values: vec![1.0, 2.0] },
                ColumnPayload { name: "label".into(), values: vec![1.0] },
            ],
        }));
        let bytes = encode(ArtifactKind::Table, 1, 2, &payload).unwrap();
        assert_eq!(Table::from_bytes(&bytes).unwrap_err().kind(), ErrorKind::ArtifactCorrupt);
    }

    #[test]
    fn load_failure_keeps_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.lgrg");
        let good = LogisticModel::from_parameters(array![1.0, 2.0, 3.0]).unwrap();
        good.save(&path).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        bytes[HEADER_SIZE] ^= 0xFF;
        std::fs::write(&path, &bytes).unwrap();

        let mut model = LogisticModel::new(1);
        let err = model.load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArtifactCorrupt);
        assert_eq!(model, LogisticModel::new(1));
    }
}
