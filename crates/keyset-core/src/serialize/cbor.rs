use crate::serialize::SerializeError;
use serde::{Serialize, de::DeserializeOwned};
use std::panic::{AssertUnwindSafe, catch_unwind};

pub(super) fn serialize<T>(value: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    serde_cbor::to_vec(value).map_err(|err| SerializeError::Serialize(err.to_string()))
}

/// Decode untrusted CBOR.
///
/// The length ceiling is checked before any parsing, and a decoder panic
/// is reported as an ordinary deserialize error instead of unwinding into
/// the caller.
pub(super) fn deserialize_bounded<T>(bytes: &[u8], max_bytes: usize) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    if bytes.len() > max_bytes {
        return Err(SerializeError::SizeLimitExceeded {
            len: bytes.len(),
            max_bytes,
        });
    }

    catch_unwind(AssertUnwindSafe(|| serde_cbor::from_slice::<T>(bytes)))
        .map_err(|_| SerializeError::Deserialize("decoder panicked".to_string()))?
        .map_err(|err| SerializeError::Deserialize(err.to_string()))
}

///
/// TESTS
///
