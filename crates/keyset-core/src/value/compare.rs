use crate::value::Value;
use std::cmp::Ordering;

/// Order two values of the same comparable variant.
///
/// Mixed variants and the non-comparable ones (`Blob`, `List`, `Null`) give
/// `None`; predicates treat that as "no match".
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    Some(match (left, right) {
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        (Value::Int(l), Value::Int(r)) => l.cmp(r),
        (Value::Float64(l), Value::Float64(r)) => l.cmp(r),
        (Value::Text(l), Value::Text(r)) => l.cmp(r),
        _ => return None,
    })
}

/// Total order over every value: tag rank first, then payload.
///
/// Only the in-memory store sorts with this; it never decides a keyset
/// boundary.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    left.tag().cmp(&right.tag()).then_with(|| match (left, right) {
        (Value::Blob(l), Value::Blob(r)) => l.as_slice().cmp(r.as_slice()),
        (Value::List(l), Value::List(r)) => l
            .iter()
            .zip(r)
            .map(|(a, b)| canonical_cmp(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| l.len().cmp(&r.len())),
        _ => strict_order_cmp(left, right).unwrap_or(Ordering::Equal),
    })
}
