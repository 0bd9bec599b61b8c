//! CBOR payload helpers. Size policy belongs to callers; this layer only
//! enforces the ceiling it is handed.

mod cbor;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error as ThisError;

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("cbor encode failed: {0}")]
    Serialize(String),

    #[error("cbor decode failed: {0}")]
    Deserialize(String),

    #[error("payload of {len} bytes exceeds the {max_bytes} byte limit")]
    SizeLimitExceeded { len: usize, max_bytes: usize },
}

pub fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializeError> {
    cbor::serialize(value)
}

/// Decode a payload produced by [`serialize`]. Inputs longer than
/// `limit` bytes are refused unread.
pub fn deserialize_bounded<T: DeserializeOwned>(
    bytes: &[u8],
    limit: usize,
) -> Result<T, SerializeError> {
    cbor::deserialize_bounded(bytes, limit)
}
