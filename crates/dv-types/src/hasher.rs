use crate::error::TypeError;
use crate::object_id::ObjectId;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"dv-commit-v1"`) that is
/// prepended to every hash computation. This prevents cross-type hash
/// collisions: a commit object and a checksum pair with identical bytes
/// produce different hashes.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for commit objects (the content store's only object kind).
    pub const COMMIT: Self = Self {
        domain: "dv-commit-v1",
    };
    /// Hasher for individual (key, value) pairs inside a snapshot checksum.
    pub const CHECKSUM_PAIR: Self = Self {
        domain: "dv-checksum-pair-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> ObjectId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ObjectId::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash a serializable value as JSON with domain separation.
    ///
    /// `serde_json` maps are `BTreeMap`-backed, so nested objects serialize
    /// in sorted key order and the result is independent of construction
    /// order.
    pub fn hash_json<T: serde::Serialize>(&self, value: &T) -> Result<ObjectId, TypeError> {
        let data =
            serde_json::to_vec(value).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Ok(self.hash(&data))
    }

    /// Verify that data produces the expected object ID.
    pub fn verify(&self, data: &[u8], expected: &ObjectId) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
