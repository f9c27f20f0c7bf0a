//! Shard I/O: loading, splicing, and persisting one bucket's record list.
//!
//! A shard is never edited in place. Every insertion writes a new file named
//! for the incremented count, committed by renaming a temp file into place,
//! and then deletes the superseded file. The rename is the commit point: at
//! no moment is the bucket's data absent from disk. A crash after the rename
//! but before the delete leaves two files for the bucket, which the catalog
//! tolerates and [`crate::FileScoreStore`] reconciles.

use crate::error::{Result, StoreError};
use podium_core::{bucket, shard_name, ScoreRecord};
use std::path::{Path, PathBuf};

/// Path of the shard file for `(bucket, count)` inside `world_dir`.
pub fn path(world_dir: &Path, bucket: u64, count: u64) -> PathBuf {
    world_dir.join(shard_name::format(bucket, count))
}

/// Load and validate the records of the shard identified by `(bucket, count)`.
///
/// A read failure is a `ShardRead` error. Content that does not parse, or
/// that violates the shard invariants (record count matching the filename,
/// every score inside the bucket, non-increasing order), is a `Corruption`
/// error. Callers decide the policy; the submission path aborts rather than
/// overwrite ranked players it could not read back.
pub fn load(world_dir: &Path, bucket_val: u64, count: u64) -> Result<Vec<ScoreRecord>> {
    let path = path(world_dir, bucket_val, count);

    let bytes = std::fs::read(&path)
        .map_err(|e| StoreError::shard_read(format!("Failed to read {:?}: {}", path, e)))?;

    let records: Vec<ScoreRecord> = serde_json::from_slice(&bytes)
        .map_err(|e| StoreError::corruption(format!("{:?}: {}", path, e)))?;

    if records.len() as u64 != count {
        return Err(StoreError::corruption(format!(
            "{:?}: holds {} records but its name says {}",
            path,
            records.len(),
            count
        )));
    }
    if let Some(r) = records.iter().find(|r| !bucket::contains(bucket_val, r.score)) {
        return Err(StoreError::corruption(format!(
            "{:?}: score {} does not belong to bucket {}",
            path, r.score, bucket_val
        )));
    }
    if records.windows(2).any(|w| w[0].score < w[1].score) {
        return Err(StoreError::corruption(format!(
            "{:?}: records are not in descending score order",
            path
        )));
    }

    Ok(records)
}

/// Index at which a new record with `score` is spliced into `records`.
///
/// The smallest index whose existing score is strictly lower, i.e. the count
/// of records ranking at-or-above the new score. An equal existing score is
/// not strictly lower, so the new record lands after it: earlier submissions
/// of the same score keep the better rank.
pub fn insertion_index(records: &[ScoreRecord], score: u64) -> usize {
    records
        .iter()
        .position(|r| r.score < score)
        .unwrap_or(records.len())
}

/// Persist `records` as the shard file for `bucket_val`.
///
/// Writes to a temp name in the same directory, then renames into place
/// (atomic on the local filesystems this store targets). The final name is
/// derived from `records.len()`, so persisting a grown record list never
/// touches the predecessor file; remove it afterwards with [`remove`].
pub fn persist(world_dir: &Path, bucket_val: u64, records: &[ScoreRecord]) -> Result<()> {
    let final_path = path(world_dir, bucket_val, records.len() as u64);

    let content = serde_json::to_vec(records)
        .map_err(|e| StoreError::persist(format!("Failed to encode {:?}: {}", final_path, e)))?;

    let tmp_path = tmp_path_for(&final_path)?;
    std::fs::write(&tmp_path, &content)
        .map_err(|e| StoreError::persist(format!("Failed to write {:?}: {}", tmp_path, e)))?;

    std::fs::rename(&tmp_path, &final_path).map_err(|e| {
        StoreError::persist(format!(
            "Failed to rename {:?} to {:?}: {}",
            tmp_path, final_path, e
        ))
    })?;

    Ok(())
}

/// Delete the shard file for `(bucket, count)`.
///
/// Idempotent: deleting a file that is already gone succeeds.
pub fn remove(world_dir: &Path, bucket_val: u64, count: u64) -> Result<()> {
    let path = path(world_dir, bucket_val, count);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::persist(format!(
            "Failed to delete {:?}: {}",
            path, e
        ))),
    }
}

/// Temp-file name beside `path`, unique per process and instant.
fn tmp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| StoreError::persist(format!("Invalid shard path {:?}", path)))?;

    let pid = std::process::id();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    Ok(path.with_file_name(format!("{}.tmp.{}.{}", file_name, pid, nanos)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player: &str, score: u64) -> ScoreRecord {
        ScoreRecord::new(player, score)
    }

    #[test]
    fn insertion_index_lands_after_equal_scores() {
        let records = vec![record("a", 1800), record("b", 1500), record("c", 1200)];
        assert_eq!(insertion_index(&records, 1900), 0);
        assert_eq!(insertion_index(&records, 1800), 1);
        assert_eq!(insertion_index(&records, 1500), 2);
        assert_eq!(insertion_index(&records, 1300), 2);
        assert_eq!(insertion_index(&records, 1000), 3);
        assert_eq!(insertion_index(&[], 500), 0);
    }

    #[test]
    fn persist_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![record("a", 1999), record("b", 1000)];
        persist(dir.path(), 1000, &records).unwrap();

        let loaded = load(dir.path(), 1000, 2).unwrap();
        assert_eq!(loaded, records);

        // No temp files left behind.
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(leftovers, vec!["1000 - 2.json".to_string()]);
    }

    #[test]
    fn load_rejects_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("1000 - 3.json"),
            r#"[{"playerId":"a","score":1500}]"#,
        )
        .unwrap();
        assert!(matches!(
            load(dir.path(), 1000, 3),
            Err(StoreError::Corruption(_))
        ));
    }

    #[test]
    fn load_rejects_foreign_scores() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("1000 - 1.json"),
            r#"[{"playerId":"a","score":2500}]"#,
        )
        .unwrap();
        assert!(matches!(
            load(dir.path(), 1000, 1),
            Err(StoreError::Corruption(_))
        ));
    }

    #[test]
    fn load_rejects_unordered_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("1000 - 2.json"),
            r#"[{"playerId":"a","score":1100},{"playerId":"b","score":1900}]"#,
        )
        .unwrap();
        assert!(matches!(
            load(dir.path(), 1000, 2),
            Err(StoreError::Corruption(_))
        ));
    }

    #[test]
    fn missing_shard_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(dir.path(), 1000, 1),
            Err(StoreError::ShardRead(_))
        ));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        persist(dir.path(), 0, &[record("a", 10)]).unwrap();
        remove(dir.path(), 0, 1).unwrap();
        remove(dir.path(), 0, 1).unwrap();
    }
}
