use crate::{
    db::{
        codec::cursor::{decode_token_text, encode_token_text},
        cursor::{
            CursorEntry, TokenError,
            digest::TokenDigest,
            wire::{MAX_PAGE_TOKEN_BYTES, PageTokenVersion, PageTokenWire},
        },
        order::SortSpecList,
    },
    serialize::{deserialize_bounded, serialize},
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// PageToken
///
/// Opaque resume point echoed back verbatim by the client.
///
/// The text is lowercase hex over a CBOR payload holding the ordered
/// cursor entries and a digest bound to the entity path. Encoding is
/// deterministic, so identical cursors always produce identical tokens.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// Encode the resume values carried by a sort list.
    pub fn encode(entity_path: &str, sorts: &SortSpecList) -> Result<Self, TokenError> {
        let entries = CursorEntry::from_sorts(sorts)
            .ok_or_else(|| TokenError::payload("sort list carries no cursor values"))?;

        Self::encode_entries(entity_path, &entries)
    }

    /// Encode an explicit entry list.
    pub fn encode_entries(entity_path: &str, entries: &[CursorEntry]) -> Result<Self, TokenError> {
        validate_entries(entries)?;

        let wire = PageTokenWire {
            version: PageTokenVersion::CURRENT.encode(),
            entries: entries.to_vec(),
            digest: TokenDigest::compute(entity_path, entries).into_bytes(),
        };
        let bytes = serialize(&wire).map_err(|err| TokenError::payload(err.to_string()))?;
        if bytes.len() > MAX_PAGE_TOKEN_BYTES {
            return Err(TokenError::TooLarge {
                len: bytes.len(),
                max: MAX_PAGE_TOKEN_BYTES,
            });
        }

        Ok(Self(encode_token_text(&bytes)))
    }

    /// Decode the ordered cursor entries. The token itself is left untouched.
    pub fn decode(&self, entity_path: &str) -> Result<Vec<CursorEntry>, TokenError> {
        let bytes = decode_token_text(&self.0)?;
        let wire: PageTokenWire = deserialize_bounded(&bytes, MAX_PAGE_TOKEN_BYTES)
            .map_err(|err| TokenError::payload(err.to_string()))?;

        // Decode the protocol version first so compatibility behavior remains centralized.
        PageTokenVersion::decode(wire.version).ok_or(TokenError::UnsupportedVersion {
            version: wire.version,
        })?;

        validate_entries(&wire.entries)?;

        let expected = TokenDigest::compute(entity_path, &wire.entries);
        if expected != TokenDigest::from_bytes(wire.digest) {
            return Err(TokenError::DigestMismatch);
        }

        Ok(wire.entries)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

// Shared structural checks for both directions of the codec.
fn validate_entries(entries: &[CursorEntry]) -> Result<(), TokenError> {
    if entries.is_empty() {
        return Err(TokenError::payload("page token carries no cursor entries"));
    }

    for entry in entries {
        if entry.column.is_empty() {
            return Err(TokenError::payload("page token entry has an empty column"));
        }
        if !entry.value.is_comparable() {
            return Err(TokenError::payload(format!(
                "page token entry '{}' carries non-comparable {}",
                entry.column,
                entry.value.tag()
            )));
        }
    }

    Ok(())
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PageToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for PageToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl AsRef<str> for PageToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
