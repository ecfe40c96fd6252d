//! In-memory storage backends for testing and embedding.
//!
//! All data lives in `HashMap`s behind `RwLock`s. Objects are cloned on
//! read/write. Data is lost when the store is dropped.

use std::collections::HashMap;
use std::sync::RwLock;

use dv_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::StoredObject;
use crate::traits::{DatasetStore, ObjectStore};

/// In-memory, HashMap-based object store.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, StoredObject>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId> {
        let id = object.compute_id();
        let mut map = self.objects.write().expect("lock poisoned");
        // Idempotent: if already present, skip (content-addressing guarantees
        // the same ID always maps to the same content).
        map.entry(id).or_insert_with(|| object.clone());
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}

/// In-memory dataset store: one compare-and-swap cell per name.
#[derive(Debug)]
pub struct InMemoryDatasetStore {
    heads: RwLock<HashMap<String, ObjectId>>,
}

impl InMemoryDatasetStore {
    /// Create a new empty dataset store.
    pub fn new() -> Self {
        Self {
            heads: RwLock::new(HashMap::new()),
        }
    }

    /// Return a sorted list of all dataset names.
    pub fn names(&self) -> Vec<String> {
        let map = self.heads.read().expect("lock poisoned");
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for InMemoryDatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStore for InMemoryDatasetStore {
    fn head(&self, name: &str) -> StoreResult<Option<ObjectId>> {
        let map = self.heads.read().expect("lock poisoned");
        Ok(map.get(name).copied())
    }

    fn advance(&self, name: &str, expected: Option<ObjectId>, new: ObjectId) -> StoreResult<()> {
        let mut map = self.heads.write().expect("lock poisoned");
        let actual = map.get(name).copied();
        if actual != expected {
            return Err(StoreError::ConcurrentAdvance {
                name: name.to_string(),
                expected,
                actual,
            });
        }
        map.insert(name.to_string(), new);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;

    fn make_commit(content: &[u8]) -> StoredObject {
        StoredObject::new(ObjectKind::Commit, content.to_vec())
    }

    // -----------------------------------------------------------------------
    // Object store
    // -----------------------------------------------------------------------

    #[test]
    fn write_and_read() {
        let store = InMemoryObjectStore::new();
        let obj = make_commit(b"hello world");
        let id = store.write(&obj).unwrap();

        let read_back = store.read(&id).unwrap().expect("should exist");
        assert_eq!(read_back, obj);
    }

    #[test]
    fn same_content_produces_same_id() {
        let store = InMemoryObjectStore::new();
        let id1 = store.write(&make_commit(b"identical")).unwrap();
        let id2 = store.write(&make_commit(b"identical")).unwrap();
        assert_eq!(id1, id2);
        // Only one object stored (dedup).
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn different_content_produces_different_ids() {
        let store = InMemoryObjectStore::new();
        let id1 = store.write(&make_commit(b"aaa")).unwrap();
        let id2 = store.write(&make_commit(b"bbb")).unwrap();
        assert_ne!(id1, id2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn read_missing_object_returns_none() {
        let store = InMemoryObjectStore::new();
        let id = ObjectId::from_bytes(b"missing");
        assert!(store.read(&id).unwrap().is_none());
        assert!(!store.exists(&id).unwrap());
    }

    #[test]
    fn exists_for_present_object() {
        let store = InMemoryObjectStore::new();
        let id = store.write(&make_commit(b"present")).unwrap();
        assert!(store.exists(&id).unwrap());
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let id = store.write(&make_commit(b"shared data")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let obj = store.read(&id).unwrap().unwrap();
                    assert_eq!(obj.compute_id(), id);
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    // -----------------------------------------------------------------------
    // Dataset store
    // -----------------------------------------------------------------------

    #[test]
    fn fresh_dataset_has_no_head() {
        let datasets = InMemoryDatasetStore::new();
        assert!(datasets.head("clients/c1").unwrap().is_none());
    }

    #[test]
    fn advance_from_empty() {
        let datasets = InMemoryDatasetStore::new();
        let id = ObjectId::from_bytes(b"first");
        datasets.advance("clients/c1", None, id).unwrap();
        assert_eq!(datasets.head("clients/c1").unwrap(), Some(id));
    }

    #[test]
    fn advance_chain() {
        let datasets = InMemoryDatasetStore::new();
        let a = ObjectId::from_bytes(b"a");
        let b = ObjectId::from_bytes(b"b");
        datasets.advance("d", None, a).unwrap();
        datasets.advance("d", Some(a), b).unwrap();
        assert_eq!(datasets.head("d").unwrap(), Some(b));
    }

    #[test]
    fn advance_cas_mismatch_leaves_head() {
        let datasets = InMemoryDatasetStore::new();
        let a = ObjectId::from_bytes(b"a");
        let b = ObjectId::from_bytes(b"b");
        let c = ObjectId::from_bytes(b"c");
        datasets.advance("d", None, a).unwrap();

        // Stale expectation: head is `a`, not None.
        let err = datasets.advance("d", None, b).unwrap_err();
        assert!(matches!(err, StoreError::ConcurrentAdvance { .. }));
        assert_eq!(datasets.head("d").unwrap(), Some(a));

        // Stale expectation: head is `a`, not `c`.
        let err = datasets.advance("d", Some(c), b).unwrap_err();
        assert!(matches!(err, StoreError::ConcurrentAdvance { .. }));
        assert_eq!(datasets.head("d").unwrap(), Some(a));
    }

    #[test]
    fn datasets_are_independent() {
        let datasets = InMemoryDatasetStore::new();
        let a = ObjectId::from_bytes(b"a");
        let b = ObjectId::from_bytes(b"b");
        datasets.advance("clients/c1", None, a).unwrap();
        datasets.advance("clients/c2", None, b).unwrap();
        assert_eq!(datasets.head("clients/c1").unwrap(), Some(a));
        assert_eq!(datasets.head("clients/c2").unwrap(), Some(b));
        assert_eq!(datasets.names(), vec!["clients/c1", "clients/c2"]);
    }
}
