//! Content-addressed object storage for Deltaview.
//!
//! This crate implements the engine's persistence boundary: a hash-keyed
//! object store plus named "dataset" references that can be advanced
//! atomically. Every commit in a client's history is stored as an immutable
//! object identified by its BLAKE3 hash; the dataset for a client always
//! points at the latest commit.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] and [`DatasetStore`] traits:
//!
//! - [`InMemoryObjectStore`] / [`InMemoryDatasetStore`] -- `HashMap`-based
//!   stores for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Write-then-link: write the commit object, then advance the dataset.
//! 3. Concurrent reads are always safe (objects are immutable).
//! 4. Dataset advancement is compare-and-swap: a failed advance leaves the
//!    previous head untouched.
//! 5. The store never interprets object contents -- it is a pure key-value
//!    store.
//! 6. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryDatasetStore, InMemoryObjectStore};
pub use object::{ObjectKind, StoredObject};
pub use traits::{DatasetStore, ObjectStore};
