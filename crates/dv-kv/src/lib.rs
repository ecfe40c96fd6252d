//! Versioned key-value snapshots for Deltaview.
//!
//! A [`Snapshot`] is an immutable mapping from string keys to JSON values,
//! paired with a [`Checksum`] computed eagerly over its contents. The
//! checksum is the integrity assertion clients carry between syncs: it
//! depends only on the logical content of the map, never on insertion
//! history or physical representation, and is independent of the
//! content-addressed id the store assigns to the commit that owns the
//! snapshot.

pub mod checksum;
pub mod error;
pub mod map;

pub use checksum::Checksum;
pub use error::{KvError, KvResult};
pub use map::Snapshot;
