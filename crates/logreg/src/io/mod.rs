//! I/O module for artifact serialization and deserialization.
//!
//! - [`native`]: the binary `.lgrg` container (header + checksum + payload)
//! - [`payload`]: Postcard payload types
//! - [`text`]: the plain-text weight rendering
//!
//! The `save`/`load` methods on [`LogisticModel`](crate::LogisticModel),
//! [`OneVsRest`](crate::OneVsRest) and [`Table`](crate::data::Table) live in
//! the `convert` submodule.

mod convert;
pub mod native;
pub mod payload;
pub mod text;

use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{LogRegError, Result};

pub use native::{
    ArtifactKind, DeserializeError, FormatHeader, NativeCodec, SerializeError,
    CURRENT_VERSION_MAJOR, CURRENT_VERSION_MINOR, HEADER_SIZE, MAGIC,
};
pub use payload::{
    ColumnPayload, LogisticPayload, OneVsRestPayload, Payload, PayloadV1, TablePayload,
};

/// Write to `path` through a temporary sibling file that is renamed into place.
///
/// Either the whole content lands at `path` (replacing any previous file) or
/// nothing changes there. The temporary file is removed on every error path.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let unwritable = |source: SerializeError| LogRegError::ArtifactUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| unwritable(e.into()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer).map_err(|e| unwritable(e.into()))?;
        writer.flush().map_err(|e| unwritable(e.into()))?;
    }
    tmp.persist(path).map_err(|e| unwritable(e.error.into()))?;

    Ok(())
}

/// Kind of the artifact stored at `path`, from its header alone.
pub fn artifact_kind(path: impl AsRef<Path>) -> Result<ArtifactKind> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LogRegError::ArtifactNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let mut head = Vec::with_capacity(HEADER_SIZE);
    file.take(HEADER_SIZE as u64)
        .read_to_end(&mut head)
        .map_err(DeserializeError::Io)?;
    let buf: [u8; HEADER_SIZE] = head.as_slice().try_into().map_err(|_| DeserializeError::Truncated {
        expected: HEADER_SIZE,
        actual: head.len(),
    })?;
    Ok(FormatHeader::from_bytes(&buf)?.kind)
}

/// Read a whole artifact into memory.
pub(crate) fn read_artifact(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| LogRegError::ArtifactNotFound {
        path: path.to_path_buf(),
        source,
    })
}
