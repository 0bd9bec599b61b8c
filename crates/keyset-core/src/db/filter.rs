use crate::{
    error::{ColumnUsage, PageError, UnknownColumnError, UnsupportedValueTypeError},
    model::EntityModel,
    value::Value,
};
use std::collections::{BTreeMap, btree_map};

///
/// FilterValue
///
/// Right-hand side of one column filter. An empty `In` set means the column
/// is not filtered at all.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterValue {
    Eq(Value),
    In(Vec<Value>),
}

impl FilterValue {
    /// Iterate the literal values this filter compares against.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        match self {
            Self::Eq(value) => std::slice::from_ref(value).iter(),
            Self::In(values) => values.iter(),
        }
    }

    /// Whether this filter contributes no predicate.
    #[must_use]
    pub const fn is_vacuous(&self) -> bool {
        matches!(self, Self::In(values) if values.is_empty())
    }
}

///
/// FilterSet
///
/// Equality / set-membership predicates ANDed together, keyed by column.
/// Keys are kept sorted so predicate output is deterministic.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSet {
    filters: BTreeMap<String, FilterValue>,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an equality filter.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters
            .insert(column.into(), FilterValue::Eq(value.into()));
        self
    }

    /// Add (or replace) a set-membership filter.
    #[must_use]
    pub fn in_<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.filters.insert(column.into(), FilterValue::In(values));
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, filter: FilterValue) {
        self.filters.insert(column.into(), filter);
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&FilterValue> {
        self.filters.get(column)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FilterValue> {
        self.filters.iter()
    }

    /// Check every filter column against the allow-list and every literal
    /// against the column's declared type.
    pub fn validate(&self, model: &EntityModel) -> Result<(), PageError> {
        for (column, filter) in &self.filters {
            let Some(column_model) = model.column(column) else {
                return Err(
                    UnknownColumnError::new(model.path(), column, ColumnUsage::Filter).into(),
                );
            };

            for value in filter.values() {
                if value.scalar_type() != Some(column_model.kind) {
                    return Err(UnsupportedValueTypeError::new(
                        column,
                        value.tag(),
                        Some(column_model.kind),
                    )
                    .into());
                }
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = (&'a String, &'a FilterValue);
    type IntoIter = btree_map::Iter<'a, String, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

impl FromIterator<(String, FilterValue)> for FilterSet {
    fn from_iter<T: IntoIterator<Item = (String, FilterValue)>>(iter: T) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{FilterSet, FilterValue};
    use crate::{
        error::{ColumnUsage, PageError},
        model::{ColumnModel, EntityModel, ScalarType},
        value::{Value, ValueTag},
    };

    fn model() -> EntityModel {
        EntityModel::try_new(
            "shop::product",
            "id",
            vec![
                ColumnModel::new("id", ScalarType::Int),
                ColumnModel::new("category_id", ScalarType::Int),
                ColumnModel::new("published", ScalarType::Bool),
            ],
        )
        .expect("model should be valid")
    }

    #[test]
    fn later_filter_on_same_column_replaces_earlier() {
        let filters = FilterSet::new().eq("category_id", 1).in_("category_id", [2, 3]);

        assert_eq!(filters.len(), 1);
        assert_eq!(
            filters.get("category_id"),
            Some(&FilterValue::In(vec![Value::Int(2), Value::Int(3)]))
        );
    }

    #[test]
    fn validate_accepts_typed_filters_and_empty_sets() {
        let filters = FilterSet::new()
            .in_("category_id", [1, 2])
            .eq("published", true)
            .in_("id", Vec::<i64>::new());

        assert!(filters.validate(&model()).is_ok());
        assert!(filters.get("id").is_some_and(FilterValue::is_vacuous));
    }

    #[test]
    fn validate_rejects_unknown_columns() {
        let err = FilterSet::new()
            .eq("owner_email", "a@b.c")
            .validate(&model())
            .expect_err("column outside allow-list");

        assert!(matches!(
            err,
            PageError::UnknownColumn(e) if e.usage == ColumnUsage::Filter
        ));
    }

    #[test]
    fn validate_rejects_mistyped_and_non_comparable_values() {
        let err = FilterSet::new()
            .in_("category_id", [Value::Int(1), Value::Null])
            .validate(&model())
            .expect_err("null member");
        assert!(matches!(
            err,
            PageError::UnsupportedValueType(e) if e.found == ValueTag::Null
        ));

        let err = FilterSet::new()
            .eq("published", 1)
            .validate(&model())
            .expect_err("int for a bool column");
        assert!(matches!(
            err,
            PageError::UnsupportedValueType(e) if e.expected == Some(ScalarType::Bool)
        ));
    }

    #[test]
    fn iteration_is_sorted_by_column() {
        let filters: FilterSet = [
            ("z".to_string(), FilterValue::Eq(Value::Int(1))),
            ("a".to_string(), FilterValue::Eq(Value::Int(2))),
        ]
        .into_iter()
        .collect();

        let columns: Vec<&str> = filters.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(columns, vec!["a", "z"]);
    }
}
