//! Append-only, per-client commit logs for Deltaview.
//!
//! Each `(accountID, clientID)` pair owns one [`ClientLog`]: a strictly
//! linear chain of [`Commit`]s linked by content hash, with a dataset
//! reference naming the latest. Commits are never mutated or deleted; the
//! head only moves forward, so any historical `stateID` a client names can
//! still be resolved and diffed against.
//!
//! The [`LogRegistry`] is the process-wide cache mapping client identity to
//! its open log. Appends to one log are serialized; different clients never
//! contend.

pub mod commit;
pub mod error;
pub mod log;
pub mod registry;

pub use commit::Commit;
pub use error::{DbError, DbResult};
pub use log::{dataset_name, ClientLog};
pub use registry::LogRegistry;
