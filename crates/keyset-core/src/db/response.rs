//! Module: db::response
//! Responsibility: the page payload handed back to the HTTP collaborator.
//! Does not own: row encoding; rows are serialized by their own `Serialize`.

use crate::db::cursor::PageToken;
use serde::Serialize;

///
/// PageResult
///
/// One page of rows plus the continuation token, if another page may
/// exist. Serializes as `{ "rows": [...], "next_token": "..." | null }`.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PageResult<R> {
    rows: Vec<R>,
    next_token: Option<PageToken>,
}

impl<R> PageResult<R> {
    /// Create a page payload.
    #[must_use]
    pub const fn new(rows: Vec<R>, next_token: Option<PageToken>) -> Self {
        Self { rows, next_token }
    }

    /// Borrow the page rows.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Borrow the continuation token.
    #[must_use]
    pub const fn next_token(&self) -> Option<&PageToken> {
        self.next_token.as_ref()
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next_token.is_some()
    }

    /// Consume this payload and return `(rows, next_token)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<R>, Option<PageToken>) {
        (self.rows, self.next_token)
    }
}

impl<R> From<PageResult<R>> for (Vec<R>, Option<PageToken>) {
    fn from(value: PageResult<R>) -> Self {
        value.into_parts()
    }
}
