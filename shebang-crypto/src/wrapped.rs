//! Normalisation of the wrapped-key byte shapes a host may hand over.
//!
//! The companion service and the pages it serves deliver the same wrapped
//! key in several representations: raw bytes, a JSON array of numbers, a
//! Node-style buffer object `{ "type": "Buffer", "data": [...] }`, or a hex
//! string (the `X-Wrapped-Key` response header). All of them normalise to
//! the same canonical byte buffer.

use crate::error::{CryptoError, CryptoResult};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A wrapped key in any of the accepted representations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WrappedKey {
    /// Plain byte buffer.
    Bytes(Vec<u8>),
    /// Generic array of numbers; every element must be an integer in 0..=255.
    Numbers(Vec<Number>),
    /// Object carrying the bytes in a `data` field.
    Buffer { data: Vec<Number> },
    /// Hex-encoded bytes.
    Hex(String),
}

impl WrappedKey {
    /// Interprets an arbitrary JSON value as a wrapped key.
    pub fn from_json(value: &Value) -> CryptoResult<Self> {
        serde_json::from_value(value.clone()).map_err(|_| {
            CryptoError::Format(format!("unrecognised representation: {}", json_kind(value)))
        })
    }

    /// Converts to the canonical byte buffer.
    pub fn to_bytes(&self) -> CryptoResult<Vec<u8>> {
        // An empty buffer is still a recognised shape; OAEP rejects it.
        let bytes = match self {
            WrappedKey::Bytes(bytes) => bytes.clone(),
            WrappedKey::Numbers(numbers) | WrappedKey::Buffer { data: numbers } => {
                numbers_to_bytes(numbers)?
            }
            WrappedKey::Hex(text) => hex::decode(text.trim())
                .map_err(|e| CryptoError::Format(format!("bad hex: {e}")))?,
        };
        Ok(bytes)
    }
}

impl From<Vec<u8>> for WrappedKey {
    fn from(bytes: Vec<u8>) -> Self {
        WrappedKey::Bytes(bytes)
    }
}

impl From<&[u8]> for WrappedKey {
    fn from(bytes: &[u8]) -> Self {
        WrappedKey::Bytes(bytes.to_vec())
    }
}

fn numbers_to_bytes(numbers: &[Number]) -> CryptoResult<Vec<u8>> {
    numbers
        .iter()
        .enumerate()
        .map(|(i, n)| {
            n.as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .ok_or_else(|| {
                    CryptoError::Format(format!("element {i} ({n}) is not a byte value"))
                })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object without a byte array `data` field",
    }
}
