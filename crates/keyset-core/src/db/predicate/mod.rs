mod ast;
mod builder;
mod eval;

#[cfg(test)]
mod tests;

pub use ast::{CompareOp, ComparePredicate, Predicate};
pub use builder::{PredicateBuilder, QueryFragment};
pub use eval::Row;
