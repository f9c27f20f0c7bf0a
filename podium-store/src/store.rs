//! File-backed score store orchestration.
//!
//! One directory per world under the store root; one shard file per non-empty
//! bucket inside it. Every operation that reads or mutates a world runs under
//! an exclusive OS-level file lock (flock semantics via `libc::flock`) on a
//! `.podium.lock` file inside the world directory, making the
//! read-modify-write cycle atomic across processes. The locked region runs on
//! the blocking thread pool with plain `std::fs`.
//!
//! For multi-writer scenarios across machines (or filesystems where OS locks
//! are not reliable, e.g. some networked FS), put a single store process in
//! front of the data directory; this lock is mutual exclusion, not a
//! distributed CAS.

use crate::catalog;
use crate::error::{Result, StoreError};
use crate::rank;
use crate::reconcile;
use crate::shard;
use crate::{Leaderboard, RankedRecord, WorldStats, UNRANKED};
use async_trait::async_trait;
use podium_core::{bucket, world, ScoreRecord};
#[cfg(unix)]
use std::fs::OpenOptions;
#[cfg(unix)]
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

/// Lock file kept inside each world directory. Ignored by the catalog.
#[cfg(unix)]
const LOCK_FILE: &str = ".podium.lock";

/// File-backed score store rooted at a data directory.
///
/// Holds no in-memory state; every operation works against the filesystem,
/// so any number of instances (or processes) may share one root.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    /// Base directory containing one subdirectory per world
    root: PathBuf,
}

impl FileScoreStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first submission, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's data root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the worlds known to this store, sorted by name.
    ///
    /// A world is a subdirectory of the root whose name is a valid world id;
    /// anything else under the root is ignored.
    pub async fn worlds(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StoreError::catalog(format!("Failed to list {:?}: {}", self.root, e)))?;

        let mut worlds = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            StoreError::catalog(format!("Failed to read entry in {:?}: {}", self.root, e))
        })? {
            let file_type = entry.file_type().await.map_err(|e| {
                StoreError::catalog(format!("Failed to stat {:?}: {}", entry.path(), e))
            })?;
            if !file_type.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if world::is_valid(&name) {
                worlds.push(name);
            }
        }

        worlds.sort();
        Ok(worlds)
    }

    fn world_dir(&self, world_id: &str) -> PathBuf {
        self.root.join(world_id)
    }
}

#[async_trait]
impl Leaderboard for FileScoreStore {
    async fn submit(&self, world_id: &str, player_id: &str, score: u64) -> Result<u64> {
        if !world::is_valid(world_id) || player_id.is_empty() || score == 0 {
            tracing::debug!(world = %world_id, score, "rejected invalid submission");
            return Ok(UNRANKED);
        }

        let world_dir = self.world_dir(world_id);
        let world = world_id.to_string();
        let record = ScoreRecord::new(player_id, score);

        tokio::task::spawn_blocking(move || submit_locked(&world_dir, &world, record))
            .await
            .map_err(|e| StoreError::persist(format!("Join error in submit: {}", e)))?
    }

    async fn top(&self, world_id: &str, limit: usize) -> Result<Vec<RankedRecord>> {
        world::validate(world_id)?;
        let world_dir = self.world_dir(world_id);

        tokio::task::spawn_blocking(move || top_locked(&world_dir, limit))
            .await
            .map_err(|e| StoreError::catalog(format!("Join error in top: {}", e)))?
    }

    async fn world_stats(&self, world_id: &str) -> Result<WorldStats> {
        world::validate(world_id)?;
        let world_dir = self.world_dir(world_id);

        tokio::task::spawn_blocking(move || stats_locked(&world_dir))
            .await
            .map_err(|e| StoreError::catalog(format!("Join error in world_stats: {}", e)))?
    }
}

/// The submission read-modify-write cycle, executed under the world lock.
fn submit_locked(world_dir: &Path, world: &str, record: ScoreRecord) -> Result<u64> {
    if !world_dir.exists() {
        std::fs::create_dir_all(world_dir).map_err(|e| {
            StoreError::catalog(format!(
                "Failed to create world directory {:?}: {}",
                world_dir, e
            ))
        })?;
        tracing::info!(world = %world, "created world directory");
    }

    let _guard = lock_world(world_dir)?;

    let entries = reconcile::repair(world_dir, catalog::list(world_dir)?)?;
    let target = bucket::bucket_for(record.score);
    let score = record.score;

    let index = match catalog::find(&entries, target) {
        None => {
            shard::persist(world_dir, target, std::slice::from_ref(&record))?;
            tracing::info!(world = %world, bucket = target, "created shard file");
            0
        }
        Some(count) => {
            let mut records = shard::load(world_dir, target, count)?;
            let index = shard::insertion_index(&records, score);
            records.insert(index, record);
            shard::persist(world_dir, target, &records)?;
            shard::remove(world_dir, target, count)?;
            index
        }
    };

    // Ranked against the catalog snapshot that predates this submission; the
    // submission's own shard contributes only the insertion index.
    let rank = rank::global_rank(&entries, target, index);
    tracing::debug!(world = %world, bucket = target, index, rank, "score recorded");
    Ok(rank)
}

/// Read the top of a world, executed under the world lock.
fn top_locked(world_dir: &Path, limit: usize) -> Result<Vec<RankedRecord>> {
    if limit == 0 || !world_dir.exists() {
        return Ok(Vec::new());
    }

    let _guard = lock_world(world_dir)?;
    let entries = reconcile::repair(world_dir, catalog::list(world_dir)?)?;

    let mut page = Vec::new();
    let mut next_rank: u64 = 1;
    for entry in entries.iter().rev() {
        if page.len() >= limit {
            break;
        }
        match shard::load(world_dir, entry.bucket, entry.count) {
            Ok(records) => {
                for (i, r) in records.into_iter().enumerate() {
                    if page.len() >= limit {
                        break;
                    }
                    page.push(RankedRecord {
                        rank: next_rank + i as u64,
                        player_id: r.player_id,
                        score: r.score,
                    });
                }
            }
            Err(e) => {
                tracing::warn!(bucket = entry.bucket, error = %e, "skipping unreadable shard in leaderboard read");
            }
        }
        // Ranks below account for this shard's catalog count even when its
        // records could not be read.
        next_rank += entry.count;
    }

    Ok(page)
}

/// Catalog-only aggregate counts, executed under the world lock.
fn stats_locked(world_dir: &Path) -> Result<WorldStats> {
    if !world_dir.exists() {
        return Ok(WorldStats::default());
    }

    let _guard = lock_world(world_dir)?;
    let entries = reconcile::repair(world_dir, catalog::list(world_dir)?)?;

    Ok(WorldStats {
        players: entries.iter().map(|e| e.count).sum(),
        buckets: entries.len() as u64,
    })
}

#[cfg(unix)]
fn lock_world(world_dir: &Path) -> Result<FlockGuard> {
    FlockGuard::lock_exclusive(&world_dir.join(LOCK_FILE))
}

/// Non-unix builds have no OS lock; single-process deployments only.
#[cfg(not(unix))]
fn lock_world(world_dir: &Path) -> Result<()> {
    let _ = world_dir;
    Ok(())
}

#[cfg(unix)]
struct FlockGuard {
    file: std::fs::File,
}

#[cfg(unix)]
impl FlockGuard {
    fn lock_exclusive(path: &Path) -> Result<Self> {
        // Ensure parent directory exists for the lock file.
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StoreError::Io)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(path)
            .map_err(StoreError::Io)?;

        let fd = file.as_raw_fd();
        let rc = unsafe { libc::flock(fd, libc::LOCK_EX) };
        if rc != 0 {
            return Err(StoreError::persist(format!(
                "Failed to acquire world lock on {:?}",
                path
            )));
        }

        Ok(Self { file })
    }
}

#[cfg(unix)]
impl Drop for FlockGuard {
    fn drop(&mut self) {
        let fd = self.file.as_raw_fd();
        unsafe {
            libc::flock(fd, libc::LOCK_UN);
        }
    }
}
