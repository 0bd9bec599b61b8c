use crate::db::cursor::CursorEntry;
use serde::{Deserialize, Serialize};

// Shared by encode and decode; the hex text ceiling is derived from it.
pub(crate) const MAX_PAGE_TOKEN_BYTES: usize = 16 * 1024;

///
/// PageTokenVersion
///
/// Wire-level token version owned by the token protocol boundary.
/// Keeps version parsing and compatibility behavior centralized.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(in crate::db::cursor) enum PageTokenVersion {
    V1,
}

impl PageTokenVersion {
    const V1_TAG: u8 = 1;

    pub(in crate::db::cursor) const CURRENT: Self = Self::V1;

    pub(in crate::db::cursor) const fn decode(raw: u8) -> Option<Self> {
        match raw {
            Self::V1_TAG => Some(Self::V1),
            _ => None,
        }
    }

    pub(in crate::db::cursor) const fn encode(self) -> u8 {
        match self {
            Self::V1 => Self::V1_TAG,
        }
    }
}

///
/// PageTokenWire
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(in crate::db::cursor) struct PageTokenWire {
    pub(in crate::db::cursor) version: u8,
    pub(in crate::db::cursor) entries: Vec<CursorEntry>,
    pub(in crate::db::cursor) digest: [u8; 16],
}
