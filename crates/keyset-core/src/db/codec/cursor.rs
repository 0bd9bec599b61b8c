//! Outer text layer of page tokens: hex over the CBOR payload built in
//! `db::cursor`. Nothing here knows what the bytes mean.

use crate::db::cursor::MAX_PAGE_TOKEN_BYTES;

// Two hex digits per payload byte, so any payload the encoder accepts also
// fits through the decoder.
pub(crate) const MAX_TOKEN_HEX_LEN: usize = 2 * MAX_PAGE_TOKEN_BYTES;

///
/// TokenTextError
///

#[derive(Clone, Debug, Eq, thiserror::Error, PartialEq)]
pub enum TokenTextError {
    #[error("token text is blank")]
    Blank,

    #[error("token text is {len} characters, limit is {max}")]
    Oversized { len: usize, max: usize },

    #[error("token text has an odd number of digits")]
    UnevenLength,

    #[error("token text has a non-hex character at byte {position}")]
    NotHex { position: usize },
}

/// Lowercase hex, two digits per byte.
#[must_use]
pub(crate) fn encode_token_text(bytes: &[u8]) -> String {
    use std::fmt::Write as _;

    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}

/// Parse token text echoed by a client.
///
/// Whitespace around the token and upper-case digits are accepted. Size is
/// checked before any digit is read; `NotHex` positions are one-based.
pub(crate) fn decode_token_text(text: &str) -> Result<Vec<u8>, TokenTextError> {
    let digits = text.trim().as_bytes();

    match digits.len() {
        0 => return Err(TokenTextError::Blank),
        len if len > MAX_TOKEN_HEX_LEN => {
            return Err(TokenTextError::Oversized {
                len,
                max: MAX_TOKEN_HEX_LEN,
            });
        }
        len if !len.is_multiple_of(2) => return Err(TokenTextError::UnevenLength),
        _ => {}
    }

    let digit = |position: usize| -> Result<u8, TokenTextError> {
        char::from(digits[position])
            .to_digit(16)
            .and_then(|d| u8::try_from(d).ok())
            .ok_or(TokenTextError::NotHex {
                position: position + 1,
            })
    };

    (0..digits.len())
        .step_by(2)
        .map(|at| Ok((digit(at)? << 4) | digit(at + 1)?))
        .collect()
}

///
/// TESTS
///
