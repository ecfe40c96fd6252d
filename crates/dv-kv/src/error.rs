/// Errors from snapshot and checksum operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KvError {
    /// A checksum string could not be decoded.
    #[error("invalid checksum: {0}")]
    InvalidChecksum(String),
}

/// Result alias for kv operations.
pub type KvResult<T> = Result<T, KvError>;
