//! Diff engine for Deltaview.
//!
//! Converts the delta between two snapshots into an ordered sequence of
//! JSON-patch style operations. Determinism is the load-bearing property:
//! the same `(base, target)` pair always produces a byte-identical patch,
//! so patches are cacheable and clients can apply them idempotently.
//!
//! # Key Types
//!
//! - [`Operation`] / [`OpKind`] -- one `add`/`remove` patch step
//! - [`diff`] -- compute the patch transforming `base` into `target`
//! - [`apply`] -- apply a patch to a snapshot (order-correctness checks)

pub mod diff;
pub mod error;
pub mod patch;

pub use diff::{apply, diff};
pub use error::{DiffError, DiffResult};
pub use patch::{OpKind, Operation, ROOT_PATH};
