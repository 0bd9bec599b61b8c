use derive_more::Display;

///
/// ValueTag
///
/// One byte per `Value` variant. The byte is hashed into page-token digests,
/// so discriminants are frozen; the declaration order is also the rank used
/// by `canonical_cmp`.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Blob = 1,
    Bool = 2,
    Float64 = 3,
    Int = 4,
    List = 5,
    Null = 6,
    Text = 7,
}

impl ValueTag {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}
