use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

///
/// Float64
///
/// Finite `f64`. Negative zero is folded into zero on construction, so the
/// bit pattern alone decides equality, hashing and the digest bytes.
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Display, Serialize)]
pub struct Float64(f64);

impl Float64 {
    /// `None` for NaN and the infinities.
    #[must_use]
    pub fn try_new(raw: f64) -> Option<Self> {
        if raw.is_nan() || raw.is_infinite() {
            None
        } else if raw == 0.0 {
            Some(Self(0.0))
        } else {
            Some(Self(raw))
        }
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

// Wire payloads go through the same finiteness check as callers.
impl<'de> Deserialize<'de> for Float64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;

        Self::try_new(raw).ok_or_else(|| D::Error::custom(format!("float {raw} is not finite")))
    }
}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Float64 {}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
