//! Text codecs for values that cross the HTTP boundary verbatim.

pub(crate) mod cursor;

pub use cursor::TokenTextError;
