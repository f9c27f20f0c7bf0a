//! Sharded on-disk score store for Podium leaderboards.
//!
//! Scores for one "world" (an independently ranked leaderboard) are stored in
//! per-bucket shard files under one directory, so a rank can be computed and a
//! score inserted without ever loading the full leaderboard into memory:
//!
//! - [`catalog`]: enumerate a world's shard files into `(bucket, count)` pairs
//! - [`shard`]: load, splice, and persist one bucket's ordered record list
//! - [`rank`]: turn a `(bucket, insertion index)` pair into a global rank
//! - [`FileScoreStore`]: orchestration (validation, locking, the
//!   read-modify-write cycle, and duplicate-shard recovery)
//!
//! # Concurrency
//!
//! Every read-modify-write cycle runs under an exclusive OS file lock scoped
//! to the world (`flock` on a `.podium.lock` file inside the world directory),
//! and every shard write commits by renaming a temp file into place. Together
//! these make concurrent submissions to the same world safe within and across
//! processes. See [`FileScoreStore`] for the recovery rules when a crash lands
//! between the rename and the delete of the superseded shard.

mod error;
mod reconcile;
mod store;

pub mod catalog;
pub mod rank;
pub mod shard;

pub use catalog::ShardEntry;
pub use error::{Result, StoreError};
pub use store::FileScoreStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sentinel rank returned for submissions that fail validation.
pub const UNRANKED: u64 = 0;

/// One record of a leaderboard read, with its 1-based global rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRecord {
    /// 1-based global rank within the world (1 = highest score)
    pub rank: u64,

    /// Identity of the submitting player
    #[serde(rename = "playerId")]
    pub player_id: String,

    /// The recorded score
    pub score: u64,
}

/// Aggregate counts for one world, computed from the catalog alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    /// Total number of recorded scores
    pub players: u64,

    /// Number of non-empty buckets (= shard files)
    pub buckets: u64,
}

/// The store's collaborator-facing contract.
///
/// The HTTP layer talks to the store exclusively through this trait.
#[async_trait]
pub trait Leaderboard: Send + Sync {
    /// Record a score and return its 1-based global rank.
    ///
    /// Returns [`UNRANKED`] (0) without touching storage when `world_id` is
    /// malformed, `player_id` is empty, or `score` is not a positive integer.
    /// Equal scores rank behind earlier submissions of the same score.
    async fn submit(&self, world_id: &str, player_id: &str, score: u64) -> Result<u64>;

    /// Read the top `limit` records of a world, highest first.
    ///
    /// An absent world yields an empty page, not an error. An unreadable
    /// shard is skipped (its records are missing from the page, but ranks of
    /// records below it still account for its catalog count).
    async fn top(&self, world_id: &str, limit: usize) -> Result<Vec<RankedRecord>>;

    /// Aggregate counts for a world, from the catalog alone (no shard loads).
    async fn world_stats(&self, world_id: &str) -> Result<WorldStats>;
}
