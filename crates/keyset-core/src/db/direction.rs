use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Direction
///
/// Per-column sort direction shared by sort specs, page tokens, predicate
/// construction and the query descriptor handed to storage.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }

    /// Stable byte used by the page-token digest.
    #[must_use]
    pub(crate) const fn to_u8(self) -> u8 {
        match self {
            Self::Asc => 0,
            Self::Desc => 1,
        }
    }

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Turn a natural-order comparison into this direction's order.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}
