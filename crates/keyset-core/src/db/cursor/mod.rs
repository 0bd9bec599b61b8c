mod digest;
mod entry;
mod error;
mod token;
mod wire;


pub use entry::CursorEntry;
pub use error::TokenError;
pub use token::PageToken;

pub(crate) use wire::MAX_PAGE_TOKEN_BYTES;
