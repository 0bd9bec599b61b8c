//! Keyset pagination: sort normalization, filters, cursor predicates,
//! page tokens and the coordinator that ties them to a storage read.

mod codec;

pub mod coordinator;
pub mod cursor;
pub mod direction;
pub mod filter;
pub mod order;
pub mod predicate;
pub mod query;
pub mod response;
pub mod sql;
pub mod store;

// re-exports
pub use codec::TokenTextError;
pub use coordinator::{PageCoordinator, PageRequest};
pub use cursor::{CursorEntry, PageToken, TokenError};
pub use direction::Direction;
pub use filter::{FilterSet, FilterValue};
pub use order::{CursorArityError, SortRequest, SortSpec, SortSpecList, normalize_sorts};
pub use predicate::{CompareOp, ComparePredicate, Predicate, PredicateBuilder, QueryFragment, Row};
pub use query::{OrderTerm, PageQuery};
pub use response::PageResult;
pub use store::{MemoryStore, PageStore, StorageError, StorageErrorKind};
