//! Error types for the score store

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in store operations
///
/// Input validation failures are deliberately absent: the submission contract
/// maps them to the sentinel rank `0`, never to an error.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Domain-level validation error (world id, shard name)
    #[error(transparent)]
    Core(#[from] podium_core::Error),

    /// A world's shard files cannot be enumerated
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A shard file's name or content does not parse, or violates the
    /// shard invariants (count mismatch, wrong bucket, out of order)
    #[error("Corrupt shard: {0}")]
    Corruption(String),

    /// A shard file that should exist cannot be read
    #[error("Shard read error: {0}")]
    ShardRead(String),

    /// Writing, renaming, or deleting a shard file failed
    #[error("Persist error: {0}")]
    Persist(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a corruption error
    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }

    /// Create a shard read error
    pub fn shard_read(msg: impl Into<String>) -> Self {
        Self::ShardRead(msg.into())
    }

    /// Create a persist error
    pub fn persist(msg: impl Into<String>) -> Self {
        Self::Persist(msg.into())
    }
}
