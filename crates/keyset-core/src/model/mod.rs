//! Runtime schema model: the allow-list of sortable/filterable columns
//! and the unique columns that can terminate an ordering.

mod entity;
mod field;


pub use entity::{EntityModel, ModelError};
pub use field::{ColumnModel, ScalarType};
