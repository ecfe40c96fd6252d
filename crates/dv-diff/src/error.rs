//! Error types for the diff crate.

/// Errors from applying a patch to a snapshot.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// A path did not start with `/`.
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    /// A `remove` named a key absent from the snapshot.
    #[error("cannot remove missing key: {0:?}")]
    MissingKey(String),

    /// An `add` carried no value.
    #[error("add at {0:?} has no value")]
    MissingValue(String),

    /// An `add` addressed the root; whole-snapshot replacement is spelled
    /// `remove "/"` followed by per-key adds.
    #[error("cannot add at root path")]
    AddAtRoot,
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
