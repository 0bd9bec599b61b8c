use crate::{db::codec::TokenTextError, model::ScalarType, value::ValueTag};
use thiserror::Error as ThisError;

///
/// TokenError
///
/// Every way a page token can fail. All decode failures, including
/// low-level text and CBOR faults, are normalized into this one kind so
/// the client is told to restart pagination.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TokenError {
    /// Token text is not valid hex.
    #[error("malformed page token: {0}")]
    Text(#[from] TokenTextError),

    /// Token payload could not be encoded or decoded.
    #[error("malformed page token: {reason}")]
    Payload { reason: String },

    /// Resume values too large to carry; raised while minting, never by decode.
    #[error("page token payload of {len} bytes exceeds the {max} byte limit")]
    TooLarge { len: usize, max: usize },

    #[error("malformed page token: unsupported version {version}")]
    UnsupportedVersion { version: u8 },

    /// Payload does not hash to its digest, or was issued for another entity.
    #[error("malformed page token: digest mismatch")]
    DigestMismatch,

    /// Token was issued for a different sort shape than the current request.
    #[error("malformed page token: issued for sort [{found}], request sorts by [{expected}]")]
    ShapeMismatch { expected: String, found: String },

    #[error("malformed page token: column '{column}' expects {expected}, token carries {found}")]
    ValueTypeMismatch {
        column: String,
        expected: ScalarType,
        found: ValueTag,
    },
}

impl TokenError {
    pub(crate) fn payload(reason: impl Into<String>) -> Self {
        Self::Payload {
            reason: reason.into(),
        }
    }

    pub(crate) fn shape_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub(crate) fn value_type_mismatch(column: &str, expected: ScalarType, found: ValueTag) -> Self {
        Self::ValueTypeMismatch {
            column: column.to_string(),
            expected,
            found,
        }
    }
}
