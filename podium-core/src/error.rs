//! Error types for podium-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// World id does not satisfy the naming rules
    #[error("Invalid world id: {0}")]
    InvalidWorld(String),

    /// Shard filename does not match the `"<bucket> - <count>.json"` encoding
    #[error("Invalid shard name: {0}")]
    InvalidShardName(String),
}

impl Error {
    /// Create an invalid world id error
    pub fn invalid_world(msg: impl Into<String>) -> Self {
        Error::InvalidWorld(msg.into())
    }

    /// Create an invalid shard name error
    pub fn invalid_shard_name(msg: impl Into<String>) -> Self {
        Error::InvalidShardName(msg.into())
    }
}
