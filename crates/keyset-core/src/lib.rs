//! Keyset (cursor) pagination core: turns filters, sort requests and an
//! opaque page token into a storage-agnostic query, and the rows that come
//! back into a page plus the token for the next one.
//!
//! Entry point is [`db::PageCoordinator`]; everything below it is pure and
//! usable on its own.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod serialize;
pub mod value;

///
/// Prelude
///
/// Request and schema vocabulary only.
/// No errors, stores, or serializers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::PageConfig,
        db::{Direction, FilterSet, PageRequest, PageToken, SortRequest},
        model::{ColumnModel, EntityModel, ScalarType},
        value::Value,
    };
}
