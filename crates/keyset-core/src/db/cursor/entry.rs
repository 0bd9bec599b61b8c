use crate::{
    db::{direction::Direction, order::SortSpecList},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// CursorEntry
///
/// One `(column, direction, value)` slot of a page token, taken from the
/// last row of the previous page. Entries keep the active sort order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CursorEntry {
    pub column: String,
    pub direction: Direction,
    pub value: Value,
}

impl CursorEntry {
    #[must_use]
    pub fn new(column: impl Into<String>, direction: Direction, value: Value) -> Self {
        Self {
            column: column.into(),
            direction,
            value,
        }
    }

    /// Entries for a resumed sort list, `None` when the list has no cursor.
    #[must_use]
    pub fn from_sorts(sorts: &SortSpecList) -> Option<Vec<Self>> {
        sorts
            .iter()
            .map(|spec| {
                spec.cursor_value()
                    .map(|value| Self::new(spec.column(), spec.direction(), value.clone()))
            })
            .collect()
    }

    /// Render the ordering shape of a decoded entry list for diagnostics.
    #[must_use]
    pub fn shape_label(entries: &[Self]) -> String {
        entries
            .iter()
            .map(|e| format!("{} {}", e.column, e.direction))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
