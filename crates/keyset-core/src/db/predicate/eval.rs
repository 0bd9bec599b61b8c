use crate::{
    db::predicate::{CompareOp, ComparePredicate, Predicate},
    value::{Value, strict_order_cmp},
};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

///
/// Row
///
/// Column access supplied by the object model. Used to evaluate predicates
/// in memory and to read the last row's sort values when building the next
/// page token.
///

pub trait Row {
    /// Value of one column, `None` when the row has no such column.
    fn column_value(&self, column: &str) -> Option<Value>;
}

impl Row for BTreeMap<String, Value> {
    fn column_value(&self, column: &str) -> Option<Value> {
        self.get(column).cloned()
    }
}

impl<S: BuildHasher> Row for HashMap<String, Value, S> {
    fn column_value(&self, column: &str) -> Option<Value> {
        self.get(column).cloned()
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn column_value(&self, column: &str) -> Option<Value> {
        (**self).column_value(column)
    }
}

impl Predicate {
    /// Evaluate this predicate against one row.
    ///
    /// Missing columns and mismatched value types never match.
    #[must_use]
    pub fn eval<R: Row + ?Sized>(&self, row: &R) -> bool {
        match self {
            Self::True => true,
            Self::And(children) => children.iter().all(|child| child.eval(row)),
            Self::Or(children) => children.iter().any(|child| child.eval(row)),
            Self::Compare(cmp) => eval_compare(row, cmp),
        }
    }
}

fn eval_compare<R: Row + ?Sized>(row: &R, cmp: &ComparePredicate) -> bool {
    let Some(actual) = row.column_value(&cmp.column) else {
        return false;
    };

    match cmp.op {
        CompareOp::Eq => strict_order_cmp(&actual, &cmp.value) == Some(Ordering::Equal),
        CompareOp::Lt => strict_order_cmp(&actual, &cmp.value) == Some(Ordering::Less),
        CompareOp::Gt => strict_order_cmp(&actual, &cmp.value) == Some(Ordering::Greater),
        CompareOp::In => match &cmp.value {
            Value::List(items) => items
                .iter()
                .any(|item| strict_order_cmp(&actual, item) == Some(Ordering::Equal)),
            _ => false,
        },
    }
}
