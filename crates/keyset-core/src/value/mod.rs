mod compare;
mod float;
mod tag;


use crate::model::ScalarType;
use serde::{Deserialize, Serialize};

// re-exports
pub use compare::{canonical_cmp, strict_order_cmp};
pub use float::Float64;
pub use tag::ValueTag;

///
/// Value
///
/// Column value as handed over by the object model, carried in filters,
/// cursors and page tokens.
///
/// Only `Bool`, `Int`, `Float64` and `Text` are comparable primitives.
/// The remaining variants exist so collaborators can pass them in and
/// receive a typed rejection instead of a wrong page.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Float64(Float64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Text(String),
}

impl Value {
    /// Construct a float value, rejecting NaN and infinities.
    #[must_use]
    pub fn float(v: f64) -> Option<Self> {
        Float64::try_new(v).map(Self::Float64)
    }

    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        match self {
            Self::Blob(_) => ValueTag::Blob,
            Self::Bool(_) => ValueTag::Bool,
            Self::Float64(_) => ValueTag::Float64,
            Self::Int(_) => ValueTag::Int,
            Self::List(_) => ValueTag::List,
            Self::Null => ValueTag::Null,
            Self::Text(_) => ValueTag::Text,
        }
    }

    /// Scalar type of a comparable primitive, `None` for everything else.
    #[must_use]
    pub const fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            Self::Bool(_) => Some(ScalarType::Bool),
            Self::Float64(_) => Some(ScalarType::Float64),
            Self::Int(_) => Some(ScalarType::Int),
            Self::Text(_) => Some(ScalarType::Text),
            Self::Blob(_) | Self::List(_) | Self::Null => None,
        }
    }

    #[must_use]
    pub const fn is_comparable(&self) -> bool {
        self.scalar_type().is_some()
    }

    /// Stable byte image of one comparable value, prefixed by its tag.
    ///
    /// Text is length-prefixed so adjacent values cannot alias.
    pub(crate) fn write_canonical_bytes(&self, out: &mut Vec<u8>) {
        out.push(self.tag().to_u8());

        match self {
            Self::Bool(v) => out.push(u8::from(*v)),
            Self::Float64(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
            Self::Text(v) => write_len_prefixed(out, v.as_bytes()),
            Self::Blob(v) => write_len_prefixed(out, v),
            Self::List(items) => {
                out.extend_from_slice(&(items.len() as u64).to_be_bytes());
                for item in items {
                    item.write_canonical_bytes(out);
                }
            }
            Self::Null => {}
        }
    }
}

fn write_len_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
    out.extend_from_slice(bytes);
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob(v) => write!(f, "<{} bytes>", v.len()),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Float64> for Value {
    fn from(v: Float64) -> Self {
        Self::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
