//! Core domain types for the Podium sharded score store.
//!
//! This crate holds the pieces shared by the store and the HTTP server:
//!
//! - [`ScoreRecord`]: one submitted score, as stored on disk
//! - [`bucket`]: the 1000-wide score partitioning scheme
//! - [`shard_name`]: the `"<bucket> - <count>.json"` filename codec
//! - [`world`]: world-id validation rules
//!
//! Nothing in here touches the filesystem; all I/O lives in `podium-store`.

mod error;
pub mod bucket;
pub mod shard_name;
pub mod world;

mod record;

pub use error::{Error, Result};
pub use record::ScoreRecord;
