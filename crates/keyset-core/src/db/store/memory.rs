use crate::{
    db::{
        predicate::Row,
        query::{OrderTerm, PageQuery},
        store::{PageStore, StorageError},
    },
    value::{Value, canonical_cmp},
};
use std::cmp::Ordering;

///
/// MemoryStore
///
/// Reference storage collaborator over an in-memory row set: evaluates the
/// predicate tree, orders by the ORDER BY list and truncates to the limit.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryStore<R> {
    rows: Vec<R>,
}

impl<R> MemoryStore<R> {
    #[must_use]
    pub const fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn insert(&mut self, row: R) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }
}

impl<R: Row + Clone> PageStore for MemoryStore<R> {
    type Row = R;

    fn fetch(&self, query: &PageQuery) -> Result<Vec<R>, StorageError> {
        let mut matched: Vec<&R> = self
            .rows
            .iter()
            .filter(|row| query.predicate().eval(*row))
            .collect();

        matched.sort_by(|left, right| compare_rows(*left, *right, query.order()));

        Ok(matched
            .into_iter()
            .take(query.limit() as usize)
            .cloned()
            .collect())
    }
}

// Compare two rows under the ORDER BY list; missing columns sort as Null.
fn compare_rows<R: Row>(left: &R, right: &R, order: &[OrderTerm]) -> Ordering {
    for term in order {
        let l = left.column_value(&term.column).unwrap_or(Value::Null);
        let r = right.column_value(&term.column).unwrap_or(Value::Null);
        let ordering = term.direction.apply(canonical_cmp(&l, &r));

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::{
        db::{
            direction::Direction,
            predicate::Predicate,
            query::{OrderTerm, PageQuery},
            store::{PageStore, StorageError, StorageErrorKind},
        },
        value::Value,
    };
    use std::{collections::BTreeMap, error::Error as _};

    fn row(id: i64, rating: Option<i64>) -> BTreeMap<String, Value> {
        let mut row = BTreeMap::from([("id".to_string(), Value::Int(id))]);
        if let Some(rating) = rating {
            row.insert("rating".to_string(), Value::Int(rating));
        }
        row
    }

    fn store() -> MemoryStore<BTreeMap<String, Value>> {
        let mut store = MemoryStore::new(vec![row(1, Some(3)), row(2, Some(5)), row(3, None)]);
        store.insert(row(4, Some(5)));
        store
    }

    #[test]
    fn fetch_filters_orders_and_limits() {
        let query = PageQuery::new(
            "shop::product",
            Predicate::gt("rating", Value::Int(2)),
            vec![
                OrderTerm::new("rating", Direction::Desc),
                OrderTerm::new("id", Direction::Asc),
            ],
            2,
        );
        let rows = store().fetch(&query).expect("memory fetch never fails");

        let ids: Vec<_> = rows.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![Value::Int(2), Value::Int(4)]);
    }

    #[test]
    fn missing_order_column_sorts_after_ints() {
        let query = PageQuery::new(
            "shop::product",
            Predicate::True,
            vec![OrderTerm::new("rating", Direction::Asc)],
            10,
        );
        let rows = store().fetch(&query).expect("memory fetch never fails");

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3]["id"], Value::Int(3));
    }

    #[test]
    fn storage_error_keeps_kind_and_source() {
        let io = std::io::Error::other("socket closed");
        let err = StorageError::from_source(StorageErrorKind::Timeout, io);

        assert_eq!(err.kind, StorageErrorKind::Timeout);
        assert_eq!(err.to_string(), "storage timeout error: socket closed");
        assert!(err.source().is_some());
        assert!(!err.is_cancelled());
        assert!(StorageError::cancelled("client went away").is_cancelled());
        assert!(StorageError::backend("deadlock").source().is_none());
    }
}
