use derive_more::Display;
use serde::Deserialize;

///
/// ScalarType
/// Declared type of one allow-listed column.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Bool,
    Float64,
    Int,
    Text,
}

///
/// ColumnModel
/// One column a request may sort or filter on.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ColumnModel {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ScalarType,
    /// Column values are unique across rows, so it can end an ordering.
    #[serde(default)]
    pub unique: bool,
}

impl ColumnModel {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ScalarType) -> Self {
        Self {
            name: name.into(),
            kind,
            unique: false,
        }
    }

    #[must_use]
    pub fn unique(name: impl Into<String>, kind: ScalarType) -> Self {
        Self {
            name: name.into(),
            kind,
            unique: true,
        }
    }
}
