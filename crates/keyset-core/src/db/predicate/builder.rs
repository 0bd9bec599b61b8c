use crate::{
    db::{
        filter::{FilterSet, FilterValue},
        order::{SortSpec, SortSpecList},
        predicate::Predicate,
        query::OrderTerm,
    },
    error::UnsupportedValueTypeError,
    value::Value,
};

///
/// QueryFragment
///
/// WHERE tree plus ORDER BY list for one page, before a limit is attached.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryFragment {
    pub predicate: Predicate,
    pub order: Vec<OrderTerm>,
}

///
/// PredicateBuilder
///
/// Stateless translation of filters and a normalized sort list into a
/// backend-agnostic predicate tree.
///
/// The cursor predicate for sorts `[s1..sn]` resuming at `(v1..vn)` is
///
/// ```text
/// Tail(n) = strict(n)
/// Tail(i) = strict(i) OR (col_i = v_i AND Tail(i + 1))
/// strict(i) = asc ? col_i > v_i : col_i < v_i
/// ```
///
/// which holds exactly when the row's tuple sorts strictly after the
/// cursor tuple under the per-column directions.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PredicateBuilder;

impl PredicateBuilder {
    /// Build `filters AND cursor` plus the unchanged ORDER BY.
    pub fn build(
        filters: &FilterSet,
        sorts: &SortSpecList,
    ) -> Result<QueryFragment, UnsupportedValueTypeError> {
        let filter = Self::filter_predicate(filters)?;
        let cursor = Self::cursor_predicate(sorts)?;

        Ok(QueryFragment {
            predicate: Predicate::and(vec![filter, cursor]),
            order: Self::order_terms(sorts),
        })
    }

    /// AND of every non-vacuous filter, in column order.
    pub fn filter_predicate(filters: &FilterSet) -> Result<Predicate, UnsupportedValueTypeError> {
        let mut conjuncts = Vec::with_capacity(filters.len());

        for (column, filter) in filters {
            for value in filter.values() {
                ensure_comparable(column, value)?;
            }

            match filter {
                _ if filter.is_vacuous() => {}
                FilterValue::Eq(value) => conjuncts.push(Predicate::eq(column, value.clone())),
                FilterValue::In(values) => conjuncts.push(Predicate::in_(column, values.clone())),
            }
        }

        Ok(Predicate::and(conjuncts))
    }

    /// Keyset continuation predicate; `True` on a first page.
    pub fn cursor_predicate(sorts: &SortSpecList) -> Result<Predicate, UnsupportedValueTypeError> {
        let Some(values) = sorts.cursor_values() else {
            return Ok(Predicate::True);
        };

        for (spec, value) in sorts.iter().zip(&values) {
            ensure_comparable(spec.column(), value)?;
        }

        // Fold from the least significant column outwards.
        let mut slots = sorts.iter().zip(values).rev();
        let Some((last_spec, last_value)) = slots.next() else {
            return Ok(Predicate::True);
        };

        let tail = slots.fold(strictly_after(last_spec, last_value), |tail, (spec, value)| {
            Predicate::or(vec![
                strictly_after(spec, value),
                Predicate::and(vec![Predicate::eq(spec.column(), value.clone()), tail]),
            ])
        });

        Ok(tail)
    }

    #[must_use]
    pub fn order_terms(sorts: &SortSpecList) -> Vec<OrderTerm> {
        sorts
            .iter()
            .map(|spec| OrderTerm::new(spec.column(), spec.direction()))
            .collect()
    }
}

// Strict single-column step in the spec's own direction.
fn strictly_after(spec: &SortSpec, value: &Value) -> Predicate {
    if spec.is_ascending() {
        Predicate::gt(spec.column(), value.clone())
    } else {
        Predicate::lt(spec.column(), value.clone())
    }
}

fn ensure_comparable(column: &str, value: &Value) -> Result<(), UnsupportedValueTypeError> {
    if value.is_comparable() {
        Ok(())
    } else {
        Err(UnsupportedValueTypeError::new(column, value.tag(), None))
    }
}
