//! Foundation types for Deltaview.
//!
//! Everything in the engine that is persisted or referenced is identified by
//! its content: an [`ObjectId`] is the domain-separated BLAKE3 hash of an
//! object's bytes. The id a sync client carries around as its `stateID` is
//! exactly the `ObjectId` of the commit it last saw.

pub mod error;
pub mod hasher;
pub mod object_id;

pub use error::TypeError;
pub use hasher::ContentHasher;
pub use object_id::ObjectId;
