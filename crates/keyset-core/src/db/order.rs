//! Module: db::order
//! Responsibility: sort specifications and their normalization into a total,
//! allow-listed ordering, optionally resumed from a page token.
//! Does not own: token wire format or predicate construction.

use crate::{
    db::{
        cursor::{CursorEntry, PageToken, TokenError},
        direction::Direction,
    },
    error::{ColumnUsage, PageError, UnknownColumnError},
    model::EntityModel,
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use std::fmt;
use thiserror::Error as ThisError;

///
/// SortRequest
///
/// One raw `(column, direction)` pair as decoded by the HTTP layer.
/// Nothing about the column has been checked yet.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortRequest {
    pub column: String,
    pub direction: Direction,
}

impl SortRequest {
    #[must_use]
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Asc)
    }

    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Desc)
    }
}

///
/// SortSpec
///
/// One ordering column, its direction, and the resume value for that
/// column when continuing from a page token.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortSpec {
    column: String,
    direction: Direction,
    cursor_value: Option<Value>,
}

impl SortSpec {
    #[must_use]
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
            cursor_value: None,
        }
    }

    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Asc)
    }

    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Desc)
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }

    #[must_use]
    pub const fn cursor_value(&self) -> Option<&Value> {
        self.cursor_value.as_ref()
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction)
    }
}

///
/// CursorArityError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("cursor value count mismatch: expected {expected}, found {found}")]
pub struct CursorArityError {
    pub expected: usize,
    pub found: usize,
}

///
/// SortSpecList
///
/// Ordered sort precedence, most significant first.
///
/// Cursor values are all-or-nothing: individual specs never carry one, and
/// `with_cursor` attaches a value to every spec at once.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct SortSpecList {
    specs: Vec<SortSpec>,
}

impl SortSpecList {
    /// Build a cursor-free list. Values already carried by `specs` are dropped.
    #[must_use]
    pub fn new(specs: Vec<SortSpec>) -> Self {
        let specs = specs
            .into_iter()
            .map(|spec| SortSpec {
                cursor_value: None,
                ..spec
            })
            .collect();

        Self { specs }
    }

    /// Attach one resume value per spec, in list order.
    pub fn with_cursor(mut self, values: Vec<Value>) -> Result<Self, CursorArityError> {
        if values.len() != self.specs.len() {
            return Err(CursorArityError {
                expected: self.specs.len(),
                found: values.len(),
            });
        }

        for (spec, value) in self.specs.iter_mut().zip(values) {
            spec.cursor_value = Some(value);
        }

        Ok(self)
    }

    #[must_use]
    pub fn has_cursor(&self) -> bool {
        self.specs.first().is_some_and(|s| s.cursor_value.is_some())
    }

    /// Borrow the resume tuple, `None` on a first page.
    #[must_use]
    pub fn cursor_values(&self) -> Option<Vec<&Value>> {
        self.specs.iter().map(SortSpec::cursor_value).collect()
    }

    /// Render the ordering shape (`rating desc, id asc`) for diagnostics.
    #[must_use]
    pub fn shape_label(&self) -> String {
        self.specs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Normalize raw sort requests into a total, allow-listed ordering.
///
/// - Every requested column must be in the entity allow-list.
/// - Repeated columns keep their first occurrence.
/// - The list is cut after the first unique column; if none is present the
///   primary key is appended ascending.
/// - With a token, its entries must match the normalized shape exactly
///   (columns and directions, in order) and supply the resume values.
pub fn normalize_sorts(
    model: &EntityModel,
    requests: &[SortRequest],
    token: Option<&PageToken>,
) -> Result<SortSpecList, PageError> {
    let mut specs: Vec<SortSpec> = Vec::with_capacity(requests.len() + 1);
    let mut terminated = false;

    for request in requests {
        if model.column(&request.column).is_none() {
            return Err(
                UnknownColumnError::new(model.path(), &request.column, ColumnUsage::Sort).into(),
            );
        }
        if terminated || specs.iter().any(|s| s.column == request.column) {
            continue;
        }

        specs.push(SortSpec::new(request.column.clone(), request.direction));
        terminated = model.is_unique(&request.column);
    }

    if !terminated {
        specs.push(SortSpec::asc(model.primary_key().name.clone()));
    }

    let list = SortSpecList::new(specs);

    match token {
        None => Ok(list),
        Some(token) => {
            let entries = token.decode(model.path())?;
            let values = resume_values(model, &list, entries)?;

            list.with_cursor(values)
                .map_err(|err| TokenError::payload(err.to_string()).into())
        }
    }
}

// Check decoded token entries against the normalized shape and extract values.
fn resume_values(
    model: &EntityModel,
    list: &SortSpecList,
    entries: Vec<CursorEntry>,
) -> Result<Vec<Value>, TokenError> {
    let shape_matches = entries.len() == list.len()
        && entries
            .iter()
            .zip(list.iter())
            .all(|(entry, spec)| entry.column == spec.column && entry.direction == spec.direction);

    if !shape_matches {
        return Err(TokenError::shape_mismatch(
            list.shape_label(),
            CursorEntry::shape_label(&entries),
        ));
    }

    entries
        .into_iter()
        .map(|entry| {
            let expected = model
                .column(&entry.column)
                .map(|c| c.kind)
                .ok_or_else(|| TokenError::payload(format!("unknown column '{}'", entry.column)))?;

            if entry.value.scalar_type() != Some(expected) {
                return Err(TokenError::value_type_mismatch(
                    &entry.column,
                    expected,
                    entry.value.tag(),
                ));
            }

            Ok(entry.value)
        })
        .collect()
}

///
/// TESTS
///
