//! The [`ObjectStore`] and [`DatasetStore`] traits defining the persistence
//! interface.
//!
//! Any backend (in-memory, filesystem, database) implements these traits to
//! provide content-addressed persistence for the sync engine.

use dv_types::ObjectId;

use crate::error::StoreResult;
use crate::object::StoredObject;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. Content-addressing guarantees this:
///   the same data always produces the same ID.
/// - Concurrent reads are always safe (objects are immutable).
/// - The store never interprets object contents.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read an object by its content-addressed ID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    /// Returns `Err` on I/O failure or data corruption.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>>;

    /// Write an object and return its content-addressed ID.
    ///
    /// If the object already exists, this is a no-op (idempotent).
    /// The returned ID is computed from the object's kind and data.
    fn write(&self, object: &StoredObject) -> StoreResult<ObjectId>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;
}

/// Named, atomically advanceable references into the object store.
///
/// A dataset is the handle a client's commit log hangs off: it names the
/// latest commit and is only ever moved forward via compare-and-swap. The
/// commit objects themselves are immutable; the dataset head is the single
/// mutable cell per client.
pub trait DatasetStore: Send + Sync {
    /// Read the current head of a dataset.
    ///
    /// Returns `Ok(None)` if the dataset has never been advanced (the
    /// first-sync case).
    fn head(&self, name: &str) -> StoreResult<Option<ObjectId>>;

    /// Atomically advance a dataset from `expected` to `new`.
    ///
    /// Succeeds only if the current head equals `expected` (`None` meaning
    /// "dataset does not exist yet"). On mismatch fails with
    /// [`StoreError::ConcurrentAdvance`](crate::StoreError::ConcurrentAdvance)
    /// and leaves the head unchanged. There is no partial advancement.
    fn advance(&self, name: &str, expected: Option<ObjectId>, new: ObjectId) -> StoreResult<()>;
}
