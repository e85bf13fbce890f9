//! Plain-text rendering of a parameter vector.
//!
//! ```text
//! 5            <- number of parameters
//! 0.0123       <- bias
//! 1.98         <- weight of feature 0
//! ...
//! ```
//!
//! Values use Rust's shortest round-trip float formatting, so reading the
//! file back yields the exact same `f64` values.

use std::io::Write;
use std::path::Path;

use ndarray::{Array1, ArrayView1};

use super::{read_artifact, write_atomic, DeserializeError};
use crate::error::Result;

/// Write `parameters` to `out` in the text rendering.
pub fn write_weights<W: Write + ?Sized>(out: &mut W, parameters: ArrayView1<'_, f64>) -> std::io::Result<()> {
    writeln!(out, "{}", parameters.len())?;
    for value in parameters.iter() {
        writeln!(out, "{value}")?;
    }
    Ok(())
}

/// Parse the text rendering.
///
/// The count line must match the number of value lines. Blank trailing lines
/// are ignored.
pub fn parse_weights(text: &str) -> std::result::Result<Array1<f64>, DeserializeError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let count_line = lines
        .next()
        .ok_or_else(|| DeserializeError::CorruptPayload("empty weights file".into()))?;
    let count: usize = count_line
        .parse()
        .map_err(|_| DeserializeError::CorruptPayload(format!("invalid count line '{count_line}'")))?;

    let values = lines
        .map(|line| {
            line.parse::<f64>()
                .map_err(|_| DeserializeError::CorruptPayload(format!("invalid value '{line}'")))
        })
        .collect::<std::result::Result<Vec<f64>, _>>()?;

    if values.len() != count {
        return Err(DeserializeError::CorruptPayload(format!(
            "header announces {count} values, found {}",
            values.len()
        )));
    }
    if count == 0 {
        return Err(DeserializeError::CorruptPayload("no parameters".into()));
    }

    Ok(Array1::from(values))
}

/// Export `parameters` as text to `path`, replacing any existing file.
pub fn export_weights(path: impl AsRef<Path>, parameters: ArrayView1<'_, f64>) -> Result<()> {
    write_atomic(path.as_ref(), |out| write_weights(out, parameters))
}

/// Read a parameter vector back from its text rendering.
pub fn read_weights(path: impl AsRef<Path>) -> Result<Array1<f64>> {
    let bytes = read_artifact(path.as_ref())?;
    let text = String::from_utf8(bytes)
        .map_err(|_| DeserializeError::CorruptPayload("weights file is not UTF-8".into()))?;
    Ok(parse_weights(&text)?)
}
