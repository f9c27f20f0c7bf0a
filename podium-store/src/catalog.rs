//! Shard catalog: enumerating the shard files of one world.
//!
//! The catalog is a directory listing parsed through the shard filename
//! codec. Because the record count is part of each filename, listing alone is
//! enough to compute rank sums; no shard content is ever read here.
//!
//! A file whose name does not parse is corruption: it is skipped and logged
//! rather than failing the listing, so a single bad file cannot make a whole
//! leaderboard unusable. The store's own artifacts (the world lock file and
//! in-flight `*.tmp.*` files) are ignored silently.

use crate::error::{Result, StoreError};
use podium_core::shard_name;
use std::path::Path;

/// One catalog entry: a shard file identified by `(bucket, count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardEntry {
    /// Lower bound of the shard's score range
    pub bucket: u64,
    /// Number of records the shard holds
    pub count: u64,
}

/// List the shard files of the world stored at `world_dir`.
///
/// Returns entries ascending by bucket. An absent directory is an empty
/// catalog, not an error; any other listing failure is a `Catalog` error.
/// Entries with the same bucket (possible after a crash between a shard's
/// rename and the delete of its predecessor) are all returned; callers
/// reconcile them before relying on bucket uniqueness.
pub fn list(world_dir: &Path) -> Result<Vec<ShardEntry>> {
    if !world_dir.exists() {
        return Ok(Vec::new());
    }

    let dir = std::fs::read_dir(world_dir)
        .map_err(|e| StoreError::catalog(format!("Failed to list {:?}: {}", world_dir, e)))?;

    let mut entries = Vec::new();
    for entry in dir {
        let entry = entry.map_err(|e| {
            StoreError::catalog(format!("Failed to read entry in {:?}: {}", world_dir, e))
        })?;

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::warn!(file = ?file_name, dir = ?world_dir, "skipping non-UTF-8 file name");
            continue;
        };

        if is_internal_artifact(name) {
            continue;
        }

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }

        match shard_name::parse(name) {
            Ok((bucket, count)) => entries.push(ShardEntry { bucket, count }),
            Err(_) => {
                tracing::warn!(file = %name, dir = ?world_dir, "skipping unparseable shard name");
            }
        }
    }

    entries.sort_by_key(|e| (e.bucket, e.count));
    Ok(entries)
}

/// Find the record count of the shard covering `bucket`, if one exists.
///
/// Linear scan; catalogs are small (one entry per non-empty 1000-wide range).
pub fn find(entries: &[ShardEntry], bucket: u64) -> Option<u64> {
    entries.iter().find(|e| e.bucket == bucket).map(|e| e.count)
}

/// Artifacts the store itself creates inside a world directory.
fn is_internal_artifact(name: &str) -> bool {
    name.starts_with('.') || name.contains(".tmp.")
}
