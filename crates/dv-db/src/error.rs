use dv_types::ObjectId;

/// Errors from commit log operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The underlying content store failed. The log's head is unchanged.
    #[error("store error: {0}")]
    Store(#[from] dv_store::StoreError),

    /// A stored commit could not be decoded, or its embedded checksum does
    /// not match its snapshot.
    #[error("corrupt commit {id}: {reason}")]
    CorruptCommit { id: ObjectId, reason: String },

    /// The dataset head names an object that is not in the store.
    #[error("dangling head: {0}")]
    DanglingHead(ObjectId),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for commit log operations.
pub type DbResult<T> = Result<T, DbError>;
