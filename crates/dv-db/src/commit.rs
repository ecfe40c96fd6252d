use serde::{Deserialize, Serialize};

use dv_kv::{Checksum, Snapshot};
use dv_store::{ObjectKind, StoredObject};
use dv_types::ObjectId;

use crate::error::{DbError, DbResult};

/// One immutable point in a client's snapshot history.
///
/// A commit owns its snapshot exclusively and records the basis (previous
/// commit) it supersedes plus the last client mutation the snapshot
/// reflects. Its `stateID` is content-derived: the hash of the serialized
/// commit, stable for equal content, comparable for equality only.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    state_id: ObjectId,
    basis: Option<ObjectId>,
    snapshot: Snapshot,
    last_mutation_id: u64,
}

/// Serialized form stored in the content store.
///
/// The checksum is embedded so a commit is self-describing; it is verified
/// against the snapshot on decode.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitPayload {
    basis: Option<ObjectId>,
    snapshot: Snapshot,
    checksum: String,
    last_mutation_id: u64,
}

impl Commit {
    /// Create a commit, deriving its `stateID` from its content.
    pub fn new(
        basis: Option<ObjectId>,
        snapshot: Snapshot,
        last_mutation_id: u64,
    ) -> DbResult<Self> {
        let mut commit = Self {
            state_id: ObjectId::from_hash([0u8; 32]),
            basis,
            snapshot,
            last_mutation_id,
        };
        commit.state_id = commit.to_stored_object()?.compute_id();
        Ok(commit)
    }

    /// The content-derived identifier clients name this commit by.
    pub fn state_id(&self) -> ObjectId {
        self.state_id
    }

    /// The commit this one superseded, or `None` for the first commit.
    pub fn basis(&self) -> Option<ObjectId> {
        self.basis
    }

    /// The snapshot this commit owns.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The snapshot's content checksum.
    pub fn checksum(&self) -> Checksum {
        self.snapshot.checksum()
    }

    /// The last client mutation the snapshot reflects.
    pub fn last_mutation_id(&self) -> u64 {
        self.last_mutation_id
    }

    /// Encode for the content store.
    pub fn to_stored_object(&self) -> DbResult<StoredObject> {
        let payload = CommitPayload {
            basis: self.basis,
            snapshot: self.snapshot.clone(),
            checksum: self.snapshot.checksum().to_hex(),
            last_mutation_id: self.last_mutation_id,
        };
        let data =
            serde_json::to_vec(&payload).map_err(|e| DbError::Serialization(e.to_string()))?;
        Ok(StoredObject::new(ObjectKind::Commit, data))
    }

    /// Decode from the content store, verifying the embedded checksum.
    pub fn from_stored_object(obj: &StoredObject) -> DbResult<Self> {
        let id = obj.compute_id();
        let payload: CommitPayload = serde_json::from_slice(&obj.data).map_err(|e| {
            DbError::CorruptCommit {
                id,
                reason: e.to_string(),
            }
        })?;
        let recomputed = payload.snapshot.checksum().to_hex();
        if payload.checksum != recomputed {
            return Err(DbError::CorruptCommit {
                id,
                reason: format!(
                    "checksum mismatch: stored {}, recomputed {}",
                    payload.checksum, recomputed
                ),
            });
        }
        Ok(Self {
            state_id: id,
            basis: payload.basis,
            snapshot: payload.snapshot,
            last_mutation_id: payload.last_mutation_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    fn snapshot(pairs: &[(&str, serde_json::Value)]) -> Snapshot {
        Snapshot::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn state_id_is_content_derived() {
        let a = Commit::new(None, snapshot(&[("foo", json!("bar"))]), 1).unwrap();
        let b = Commit::new(None, snapshot(&[("foo", json!("bar"))]), 1).unwrap();
        assert_eq!(a.state_id(), b.state_id());

        let c = Commit::new(None, snapshot(&[("foo", json!("bar"))]), 2).unwrap();
        assert_ne!(a.state_id(), c.state_id());

        let d = Commit::new(Some(a.state_id()), snapshot(&[("foo", json!("bar"))]), 1).unwrap();
        assert_ne!(a.state_id(), d.state_id());
    }

    #[test]
    fn stored_object_roundtrip() {
        let commit = Commit::new(None, snapshot(&[("k", json!([1, 2]))]), 7).unwrap();
        let obj = commit.to_stored_object().unwrap();
        assert_eq!(obj.compute_id(), commit.state_id());

        let decoded = Commit::from_stored_object(&obj).unwrap();
        assert_eq!(decoded, commit);
        assert_eq!(decoded.last_mutation_id(), 7);
        assert_eq!(decoded.checksum(), commit.checksum());
    }

    #[test]
    fn decode_rejects_checksum_mismatch() {
        let commit = Commit::new(None, snapshot(&[("k", json!("v"))]), 1).unwrap();
        let obj = commit.to_stored_object().unwrap();

        // Tamper with the stored snapshot but keep the old checksum field.
        let mut text = String::from_utf8(obj.data.clone()).unwrap();
        text = text.replace(r#"{"k":"v"}"#, r#"{"k":"tampered"}"#);
        let tampered = StoredObject::new(ObjectKind::Commit, text.into_bytes());

        let err = Commit::from_stored_object(&tampered).unwrap_err();
        assert!(matches!(err, DbError::CorruptCommit { .. }));
    }

    #[test]
    fn decode_rejects_garbage() {
        let garbage = StoredObject::new(ObjectKind::Commit, b"not json".to_vec());
        assert!(matches!(
            Commit::from_stored_object(&garbage),
            Err(DbError::CorruptCommit { .. })
        ));
    }
}
