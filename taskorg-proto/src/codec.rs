//! JSON serialization for the `TaskOrganizer` REST wire format.
//!
//! Thin wrappers over `serde_json` that map failures into [`CodecError`],
//! so callers can tell a malformed body apart from a transport failure.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The body is not valid JSON, or lacks an expected field.
    #[error("malformed body: {0}")]
    Malformed(String),
}

/// Encodes a request body as JSON bytes.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the value cannot be serialized.
pub fn encode<T: Serialize>(body: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(body).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a response body from JSON bytes.
///
/// # Errors
///
/// Returns `CodecError::Malformed` if the bytes are not valid JSON or do
/// not match the expected shape (including missing required fields).
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Malformed(e.to_string()))
}
