use derive_more::Display;
use std::error::Error as StdError;
use thiserror::Error as ThisError;

///
/// StorageErrorKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum StorageErrorKind {
    /// The backend failed to execute the query.
    #[display("backend")]
    Backend,
    /// The caller's context was cancelled while the query ran.
    #[display("cancelled")]
    Cancelled,
    /// The query exceeded its deadline.
    #[display("timeout")]
    Timeout,
}

///
/// StorageError
///
/// Opaque failure reported by the storage collaborator. Passed through to
/// the caller unchanged and never retried here.
///

#[derive(Debug, ThisError)]
#[error("storage {kind} error: {message}")]
pub struct StorageError {
    pub kind: StorageErrorKind,
    pub message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl StorageError {
    pub fn new(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::Backend, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::Cancelled, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::Timeout, message)
    }

    /// Wrap a backend error, keeping it as the error source.
    pub fn from_source<E>(kind: StorageErrorKind, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            kind,
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.kind, StorageErrorKind::Cancelled)
    }
}
