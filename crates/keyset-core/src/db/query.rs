use crate::db::{direction::Direction, predicate::Predicate};

///
/// OrderTerm
/// One ORDER BY entry.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct OrderTerm {
    pub column: String,
    pub direction: Direction,
}

impl OrderTerm {
    #[must_use]
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

///
/// PageQuery
///
/// Structured query descriptor handed to the storage collaborator:
/// predicate tree, ORDER BY list and row limit. Turning it into a concrete
/// query language is the collaborator's job (see `db::sql` for one).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageQuery {
    entity_path: String,
    predicate: Predicate,
    order: Vec<OrderTerm>,
    limit: u32,
}

impl PageQuery {
    #[must_use]
    pub fn new(
        entity_path: impl Into<String>,
        predicate: Predicate,
        order: Vec<OrderTerm>,
        limit: u32,
    ) -> Self {
        Self {
            entity_path: entity_path.into(),
            predicate,
            order,
            limit,
        }
    }

    #[must_use]
    pub fn entity_path(&self) -> &str {
        &self.entity_path
    }

    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    #[must_use]
    pub fn order(&self) -> &[OrderTerm] {
        &self.order
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }
}
