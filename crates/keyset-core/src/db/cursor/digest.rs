use crate::db::cursor::CursorEntry;
use sha2::{Digest, Sha256};

const DIGEST_DOMAIN: &[u8] = b"keyset:page-token:v1";

///
/// TokenDigest
///
/// Truncated SHA-256 over the entity path and every entry's column,
/// direction and canonical value bytes. Binds a token to its entity and
/// flags payloads edited after issue.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(in crate::db::cursor) struct TokenDigest([u8; 16]);

impl TokenDigest {
    pub(in crate::db::cursor) fn compute(entity_path: &str, entries: &[CursorEntry]) -> Self {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(DIGEST_DOMAIN);
        write_len_prefixed(&mut buf, entity_path.as_bytes());

        for entry in entries {
            write_len_prefixed(&mut buf, entry.column.as_bytes());
            buf.push(entry.direction.to_u8());
            entry.value.write_canonical_bytes(&mut buf);
        }

        let hash = Sha256::digest(&buf);
        let mut out = [0u8; 16];
        out.copy_from_slice(&hash[..16]);

        Self(out)
    }

    pub(in crate::db::cursor) const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub(in crate::db::cursor) const fn into_bytes(self) -> [u8; 16] {
        self.0
    }
}

fn write_len_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
    buf.extend_from_slice(bytes);
}
