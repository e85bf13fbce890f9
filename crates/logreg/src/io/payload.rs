//! Payload structures for the native artifact format.
//!
//! These structs are designed for serialization with Postcard. They mirror the
//! runtime types but stay independent of them so the format can evolve
//! separately.

use serde::{Deserialize, Serialize};

// ============================================================================
// Envelope
// ============================================================================

/// Outermost payload value. A format revision adds a variant; existing
/// variants are never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    V1(PayloadV1),
}

/// Objects encodable in format 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PayloadV1 {
    /// A single logistic model.
    Logistic(LogisticPayload),
    /// One logistic model per class.
    OneVsRest(OneVsRestPayload),
    /// Named columns of equal length.
    Table(TablePayload),
}

// ============================================================================
// Model Payloads
// ============================================================================

/// Logistic model payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticPayload {
    /// Parameter vector: bias first, then one weight per feature.
    pub parameters: Vec<f64>,
    /// Number of gradient iterations that produced the parameters.
    pub num_iterations: u32,
}

/// One-vs-rest ensemble payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneVsRestPayload {
    /// One model per class, in class order.
    pub models: Vec<LogisticPayload>,
}

// ============================================================================
// Table Payload
// ============================================================================

/// Columnar table payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePayload {
    /// Human-readable description of the table contents.
    pub title: String,
    /// Columns in insertion order.
    pub columns: Vec<ColumnPayload>,
}

/// A single named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnPayload {
    pub name: String,
    pub values: Vec<f64>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes() {
        let payload = Payload::V1(PayloadV1::Logistic(LogisticPayload {
            parameters: vec![0.1, 0.2, 0.3],
            num_iterations: 1000,
        }));

        let bytes = postcard::to_allocvec(&payload).unwrap();
        assert!(!bytes.is_empty());

        let restored: Payload = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(restored, payload);
    }

    #[test]
    fn garbage_does_not_decode_as_table() {
        let bytes = [0u8, 2, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(postcard::from_bytes::<Payload>(&bytes).is_err());
    }
}
