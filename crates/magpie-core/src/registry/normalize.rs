//! Payload normalization
//!
//! Upstream has published the registry both as a bare array of records and
//! as an object wrapping them under `items`. Both reduce to the same record
//! sequence here, whichever tier the bytes came from.

use serde_json::Value;

/// Field holding the records in the wrapped shape
pub const ITEMS_FIELD: &str = "items";

/// Error type for unusable registry payloads.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Registry payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unexpected registry structure: expected an array or an object with an 'items' array")]
    UnexpectedShape,
}

/// Parse registry bytes into the raw record sequence.
pub fn parse_payload(bytes: &[u8]) -> Result<Vec<Value>, PayloadError> {
    let document: Value = serde_json::from_slice(bytes)?;
    records_from_document(document)
}

/// Extract records from an already parsed document
pub fn records_from_document(document: Value) -> Result<Vec<Value>, PayloadError> {
    match document {
        Value::Array(records) => Ok(records),
        Value::Object(mut object) => match object.remove(ITEMS_FIELD) {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(PayloadError::UnexpectedShape),
        },
        _ => Err(PayloadError::UnexpectedShape),
    }
}
