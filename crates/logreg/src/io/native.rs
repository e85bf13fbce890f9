//! The `.lgrg` binary container.
//!
//! An artifact is a fixed 32-byte header followed by a Postcard payload. The
//! header carries enough to reject a foreign, damaged or mismatched file
//! before the payload is decoded:
//!
//! ```text
//! offset  len  field
//!      0    4  magic "LGRG"
//!      4    1  format major
//!      5    1  format minor
//!      6    1  artifact kind
//!      7    1  (zero)
//!      8    4  payload length, LE
//!     12    4  CRC32 of the payload, LE
//!     16    4  feature count, LE
//!     20    4  item count (models or rows), LE
//!     24    8  (zero)
//! ```
//!
//! ```
//! use logreg::io::{ArtifactKind, NativeCodec};
//!
//! let codec = NativeCodec::new();
//! let bytes = codec.serialize(ArtifactKind::Logistic, 2, 1, &vec![0.5f64, 1.0, -1.0]).unwrap();
//! let (header, values): (_, Vec<f64>) = codec.deserialize(&bytes).unwrap();
//!
//! assert_eq!(header.kind, ArtifactKind::Logistic);
//! assert_eq!(values, vec![0.5, 1.0, -1.0]);
//! ```

use std::io::{Read, Write};

use thiserror::Error;

pub const MAGIC: &[u8; 4] = b"LGRG";

/// Format major version. Readers reject anything newer.
pub const CURRENT_VERSION_MAJOR: u8 = 1;
pub const CURRENT_VERSION_MINOR: u8 = 0;

pub const HEADER_SIZE: usize = 32;

const AT_MAJOR: usize = 4;
const AT_MINOR: usize = 5;
const AT_KIND: usize = 6;
const AT_LEN: usize = 8;
const AT_CRC: usize = 12;
const AT_FEATURES: usize = 16;
const AT_ITEMS: usize = 20;

// =============================================================================
// Artifact kind
// =============================================================================

/// Which object an artifact holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ArtifactKind {
    Logistic = 0,
    OneVsRest = 1,
    Table = 2,
}

impl TryFrom<u8> for ArtifactKind {
    type Error = DeserializeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Logistic),
            1 => Ok(Self::OneVsRest),
            2 => Ok(Self::Table),
            other => Err(DeserializeError::UnknownKind(other)),
        }
    }
}

// =============================================================================
// Header
// =============================================================================

/// Decoded artifact header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatHeader {
    pub version_major: u8,
    pub version_minor: u8,
    pub kind: ArtifactKind,
    /// Payload length in bytes.
    pub payload_size: u32,
    /// CRC32 of the payload bytes.
    pub checksum: u32,
    pub num_features: u32,
    /// Models in an ensemble, rows in a table, 1 for a single model.
    pub num_items: u32,
}

impl FormatHeader {
    /// Header at the current format version. Length and checksum are filled
    /// in when the payload is written.
    pub fn new(kind: ArtifactKind, num_features: u32, num_items: u32) -> Self {
        Self {
            version_major: CURRENT_VERSION_MAJOR,
            version_minor: CURRENT_VERSION_MINOR,
            kind,
            payload_size: 0,
            checksum: 0,
            num_features,
            num_items,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[..MAGIC.len()].copy_from_slice(MAGIC);
        out[AT_MAJOR] = self.version_major;
        out[AT_MINOR] = self.version_minor;
        out[AT_KIND] = self.kind as u8;
        for (at, value) in [
            (AT_LEN, self.payload_size),
            (AT_CRC, self.checksum),
            (AT_FEATURES, self.num_features),
            (AT_ITEMS, self.num_items),
        ] {
            out[at..at + 4].copy_from_slice(&value.to_le_bytes());
        }
        out
    }

    /// Parse and validate a header: magic, version, kind.
    pub fn from_bytes(raw: &[u8; HEADER_SIZE]) -> Result<Self, DeserializeError> {
        if !raw.starts_with(MAGIC) {
            return Err(DeserializeError::NotAnArtifact);
        }

        let (major, minor) = (raw[AT_MAJOR], raw[AT_MINOR]);
        if major > CURRENT_VERSION_MAJOR {
            return Err(DeserializeError::UnsupportedVersion { major, minor });
        }

        let le_u32 = |at: usize| {
            let mut word = [0u8; 4];
            word.copy_from_slice(&raw[at..at + 4]);
            u32::from_le_bytes(word)
        };

        Ok(Self {
            version_major: major,
            version_minor: minor,
            kind: ArtifactKind::try_from(raw[AT_KIND])?,
            payload_size: le_u32(AT_LEN),
            checksum: le_u32(AT_CRC),
            num_features: le_u32(AT_FEATURES),
            num_items: le_u32(AT_ITEMS),
        })
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("payload encoding failed: {0}")]
    Encoding(#[from] postcard::Error),
}

#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("missing LGRG magic, not a logreg artifact")]
    NotAnArtifact,

    #[error("format version {major}.{minor} is newer than this reader")]
    UnsupportedVersion { major: u8, minor: u8 },

    #[error("unknown artifact kind tag {0}")]
    UnknownKind(u8),

    #[error("payload CRC32 {actual:#010x} does not match header {expected:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("truncated: needed {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Decoded fine but violates a model or table invariant.
    #[error("invalid content: {0}")]
    CorruptPayload(String),

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("payload decoding failed: {0}")]
    Decoding(#[from] postcard::Error),

    #[error("expected a {expected:?} artifact, found {actual:?}")]
    KindMismatch {
        expected: ArtifactKind,
        actual: ArtifactKind,
    },
}

// =============================================================================
// Codec
// =============================================================================

/// Frames payloads with a header and checks them on the way back in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec;

impl NativeCodec {
    pub fn new() -> Self {
        Self
    }

    /// Write `header` followed by `payload`, stamping the payload length and
    /// checksum into the header first.
    pub fn write_frame<W: Write>(
        &self,
        out: &mut W,
        header: &mut FormatHeader,
        payload: &[u8],
    ) -> Result<(), SerializeError> {
        header.payload_size = u32::try_from(payload.len()).map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "payload exceeds 4 GiB")
        })?;
        header.checksum = crc32fast::hash(payload);

        out.write_all(&header.to_bytes())?;
        out.write_all(payload)?;
        Ok(())
    }

    /// Read one frame, returning the header and the checksum-verified payload.
    pub fn read_frame<R: Read>(
        &self,
        input: &mut R,
    ) -> Result<(FormatHeader, Vec<u8>), DeserializeError> {
        let mut raw = [0u8; HEADER_SIZE];
        fill(input, &mut raw)?;
        let header = FormatHeader::from_bytes(&raw)?;

        let mut payload = vec![0u8; header.payload_size as usize];
        fill(input, &mut payload)?;

        let actual = crc32fast::hash(&payload);
        if actual != header.checksum {
            return Err(DeserializeError::ChecksumMismatch {
                expected: header.checksum,
                actual,
            });
        }
        Ok((header, payload))
    }

    /// Encode `payload` with Postcard and frame it.
    pub fn serialize<T: serde::Serialize>(
        &self,
        kind: ArtifactKind,
        num_features: u32,
        num_items: u32,
        payload: &T,
    ) -> Result<Vec<u8>, SerializeError> {
        let body = postcard::to_allocvec(payload)?;
        let mut header = FormatHeader::new(kind, num_features, num_items);

        let mut framed = Vec::with_capacity(HEADER_SIZE + body.len());
        self.write_frame(&mut framed, &mut header, &body)?;
        Ok(framed)
    }

    /// Unframe and decode an artifact of any kind.
    pub fn deserialize<T: serde::de::DeserializeOwned>(
        &self,
        bytes: &[u8],
    ) -> Result<(FormatHeader, T), DeserializeError> {
        let (header, body) = self.read_frame(&mut &bytes[..])?;
        Ok((header, postcard::from_bytes(&body)?))
    }

    /// Like [`deserialize`](Self::deserialize), but the header must announce
    /// `expected`. The kind is checked before the payload is decoded.
    pub fn deserialize_kind<T: serde::de::DeserializeOwned>(
        &self,
        bytes: &[u8],
        expected: ArtifactKind,
    ) -> Result<(FormatHeader, T), DeserializeError> {
        let (header, body) = self.read_frame(&mut &bytes[..])?;
        if header.kind != expected {
            return Err(DeserializeError::KindMismatch {
                expected,
                actual: header.kind,
            });
        }
        Ok((header, postcard::from_bytes(&body)?))
    }
}

/// Fill `buf` completely or report how far the input got.
fn fill<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<(), DeserializeError> {
    let mut got = 0;
    while got < buf.len() {
        match input.read(&mut buf[got..]) {
            Ok(0) => {
                return Err(DeserializeError::Truncated {
                    expected: buf.len(),
                    actual: got,
                })
            }
            Ok(n) => got += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(kind: ArtifactKind, body: &[u8]) -> Vec<u8> {
        let mut header = FormatHeader::new(kind, 3, 7);
        let mut out = Vec::new();
        NativeCodec::new().write_frame(&mut out, &mut header, body).unwrap();
        out
    }

    #[test]
    fn header_fields_survive_encoding() {
        let header = FormatHeader {
            version_major: 1,
            version_minor: 4,
            kind: ArtifactKind::Table,
            payload_size: 999,
            checksum: 0x0102_0304,
            num_features: 12,
            num_items: 65_536,
        };
        let raw = header.to_bytes();

        assert_eq!(&raw[..4], MAGIC);
        assert_eq!(raw[AT_KIND], 2);
        assert_eq!(&raw[AT_CRC..AT_CRC + 4], &[4, 3, 2, 1]);
        assert!(raw[24..].iter().all(|&b| b == 0));
        assert_eq!(FormatHeader::from_bytes(&raw).unwrap(), header);
    }

    #[test]
    fn header_rejections() {
        let good = FormatHeader::new(ArtifactKind::Logistic, 1, 1).to_bytes();

        let mut raw = good;
        raw[1] = b'!';
        assert!(matches!(FormatHeader::from_bytes(&raw), Err(DeserializeError::NotAnArtifact)));

        let mut raw = good;
        raw[AT_MAJOR] = CURRENT_VERSION_MAJOR + 1;
        assert!(matches!(
            FormatHeader::from_bytes(&raw),
            Err(DeserializeError::UnsupportedVersion { major: 2, minor: 0 })
        ));

        let mut raw = good;
        raw[AT_KIND] = 9;
        assert!(matches!(FormatHeader::from_bytes(&raw), Err(DeserializeError::UnknownKind(9))));
    }

    #[test]
    fn newer_minor_version_is_readable() {
        let mut raw = framed(ArtifactKind::Logistic, b"body");
        raw[AT_MINOR] = 7;
        let (header, body) = NativeCodec::new().read_frame(&mut raw.as_slice()).unwrap();
        assert_eq!(header.version_minor, 7);
        assert_eq!(body, b"body");
    }

    #[test]
    fn frame_checks_payload() {
        let codec = NativeCodec::new();

        let raw = framed(ArtifactKind::OneVsRest, b"three models");
        let (header, body) = codec.read_frame(&mut raw.as_slice()).unwrap();
        assert_eq!(header.payload_size, 12);
        assert_eq!((header.num_features, header.num_items), (3, 7));
        assert_eq!(body, b"three models");

        let mut flipped = raw.clone();
        *flipped.last_mut().unwrap() ^= 0x01;
        assert!(matches!(
            codec.read_frame(&mut flipped.as_slice()),
            Err(DeserializeError::ChecksumMismatch { .. })
        ));

        assert!(matches!(
            codec.read_frame(&mut &raw[..HEADER_SIZE + 4]),
            Err(DeserializeError::Truncated { expected: 12, actual: 4 })
        ));
        assert!(matches!(
            codec.read_frame(&mut &raw[..HEADER_SIZE - 1]),
            Err(DeserializeError::Truncated { expected: HEADER_SIZE, actual: 31 })
        ));
    }

    #[test]
    fn typed_decode_checks_kind() {
        let codec = NativeCodec::new();
        let bytes = codec.serialize(ArtifactKind::Table, 0, 2, &vec![4.0f64, 5.0]).unwrap();

        let (_, values): (_, Vec<f64>) = codec.deserialize_kind(&bytes, ArtifactKind::Table).unwrap();
        assert_eq!(values, vec![4.0, 5.0]);

        assert!(matches!(
            codec.deserialize_kind::<Vec<f64>>(&bytes, ArtifactKind::Logistic),
            Err(DeserializeError::KindMismatch {
                expected: ArtifactKind::Logistic,
                actual: ArtifactKind::Table,
            })
        ));
    }
}
