//! Order-independent content checksum over snapshot entries.
//!
//! Each `(key, value)` pair is hashed individually with a domain-separated
//! BLAKE3 hash, and the per-pair digests are combined by lane-wise wrapping
//! addition of four little-endian u64 lanes (a multiset hash). The result
//! depends only on the set of pairs, not on the order they are visited in,
//! and forging a colliding snapshot requires inverting BLAKE3.

use std::fmt;

use serde_json::Value;

use dv_types::ContentHasher;

use crate::error::KvError;

/// Length of the hex wire form of a [`Checksum`].
pub const HEX_LEN: usize = 64;

/// A 32-byte content checksum of a snapshot.
///
/// Equality of checksums is a proxy for content equality with
/// cryptographically negligible collision probability. The checksum is
/// deliberately distinct from the content-addressed commit id, so a client
/// and server can detect disagreement even if their content hashing ever
/// differs.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum([u8; 32]);

impl Checksum {
    /// The checksum of the empty snapshot.
    pub fn empty() -> Self {
        Self([0u8; 32])
    }

    /// Compute the checksum over an iterator of entries.
    ///
    /// Order-independent: any permutation of the same pairs yields the same
    /// digest.
    pub fn compute<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let mut lanes = [0u64; 4];
        for (key, value) in entries {
            let digest = pair_digest(key, value);
            for (lane, chunk) in lanes.iter_mut().zip(digest.chunks_exact(8)) {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(chunk);
                *lane = lane.wrapping_add(u64::from_le_bytes(buf));
            }
        }
        let mut out = [0u8; 32];
        for (i, lane) in lanes.iter().enumerate() {
            out[i * 8..(i + 1) * 8].copy_from_slice(&lane.to_le_bytes());
        }
        Self(out)
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded wire form (64 lowercase hex characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string. Requires exactly 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, KvError> {
        if s.len() != HEX_LEN {
            return Err(KvError::InvalidChecksum(format!(
                "expected {HEX_LEN} hex characters, got {}",
                s.len()
            )));
        }
        let bytes = hex::decode(s).map_err(|e| KvError::InvalidChecksum(e.to_string()))?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Returns `true` if `s` has the shape of a checksum: fixed length,
    /// lowercase hex alphabet.
    pub fn is_valid_hex(s: &str) -> bool {
        s.len() == HEX_LEN && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

/// Domain-separated digest of one `(key, value)` pair.
///
/// Encoding: `len(key) as u64 LE || key bytes || compact JSON of value`.
/// The length prefix keeps `("ab", "c")` and `("a", "bc")`-style boundary
/// ambiguities out of the hash. `serde_json` renders object members in
/// sorted key order, so the value encoding is canonical.
fn pair_digest(key: &str, value: &Value) -> [u8; 32] {
    let mut buf = Vec::with_capacity(8 + key.len() + 16);
    buf.extend_from_slice(&(key.len() as u64).to_le_bytes());
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(value.to_string().as_bytes());
    *ContentHasher::CHECKSUM_PAIR.hash(&buf).as_bytes()
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum({})", &self.to_hex()[..8])
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
