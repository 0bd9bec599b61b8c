use crate::{
    db::{cursor::TokenError, store::StorageError},
    model::ScalarType,
    value::ValueTag,
};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// PageError
///
/// Every failure a paginated read can surface to the HTTP collaborator.
/// No variant carries partial results.
///

#[derive(Debug, ThisError)]
pub enum PageError {
    #[error(transparent)]
    UnknownColumn(#[from] UnknownColumnError),

    #[error(transparent)]
    MalformedToken(#[from] TokenError),

    #[error(transparent)]
    UnsupportedValueType(#[from] UnsupportedValueTypeError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PageError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MalformedToken(TokenError::TooLarge { .. }) | Self::UnsupportedValueType(_) => {
                ErrorClass::Internal
            }
            Self::UnknownColumn(_) | Self::MalformedToken(_) => ErrorClass::Rejected,
            Self::Storage(_) => ErrorClass::Storage,
        }
    }

    /// Whether the client should drop its token and start again from page one.
    #[must_use]
    pub const fn restart_pagination(&self) -> bool {
        matches!(self, Self::MalformedToken(err) if !matches!(err, TokenError::TooLarge { .. }))
    }
}

///
/// ErrorClass
/// Coarse classification for mapping failures onto transport status codes.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    /// The request itself is invalid (bad column, bad token).
    #[display("rejected")]
    Rejected,
    /// Integration/programming error between collaborators.
    #[display("internal")]
    Internal,
    /// Storage collaborator failure, surfaced unchanged.
    #[display("storage")]
    Storage,
}

///
/// ColumnUsage
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ColumnUsage {
    #[display("filter")]
    Filter,
    #[display("sort")]
    Sort,
}

///
/// UnknownColumnError
///
/// A request named a column outside the entity allow-list.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown {usage} column '{column}' for entity '{entity_path}'")]
pub struct UnknownColumnError {
    pub entity_path: String,
    pub column: String,
    pub usage: ColumnUsage,
}

impl UnknownColumnError {
    pub(crate) fn new(entity_path: &str, column: &str, usage: ColumnUsage) -> Self {
        Self {
            entity_path: entity_path.to_string(),
            column: column.to_string(),
            usage,
        }
    }
}

///
/// UnsupportedValueTypeError
///
/// A filter or cursor value is not a supported comparable primitive, or
/// does not match the declared column type.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unsupported value type for column '{column}': {}", type_mismatch(.expected, .found))]
pub struct UnsupportedValueTypeError {
    pub column: String,
    pub found: ValueTag,
    pub expected: Option<ScalarType>,
}

impl UnsupportedValueTypeError {
    pub(crate) fn new(column: &str, found: ValueTag, expected: Option<ScalarType>) -> Self {
        Self {
            column: column.to_string(),
            found,
            expected,
        }
    }
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn type_mismatch(expected: &Option<ScalarType>, found: &ValueTag) -> String {
    match expected {
        Some(expected) => format!("expected {expected}, found {found}"),
        None => format!("{found} is not comparable"),
    }
}

///
/// TESTS
///
