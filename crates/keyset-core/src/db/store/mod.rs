//! Module: db::store
//! Responsibility: the storage collaborator boundary.
//! Does not own: query composition; stores receive a finished `PageQuery`.

mod error;
mod memory;

pub use error::{StorageError, StorageErrorKind};
pub use memory::MemoryStore;

use crate::db::{predicate::Row, query::PageQuery};

///
/// PageStore
///
/// Executes one page query and returns at most `query.limit()` rows in
/// the requested order. Cancellation and deadlines belong to the store;
/// it reports them as `StorageError` and the coordinator passes them on.
///

pub trait PageStore {
    type Row: Row;

    fn fetch(&self, query: &PageQuery) -> Result<Vec<Self::Row>, StorageError>;
}

impl<S: PageStore + ?Sized> PageStore for &S {
    type Row = S::Row;

    fn fetch(&self, query: &PageQuery) -> Result<Vec<Self::Row>, StorageError> {
        (**self).fetch(query)
    }
}
