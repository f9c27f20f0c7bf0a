//! Duplicate-shard reconciliation.
//!
//! The commit sequence renames the grown shard into place and then deletes
//! its predecessor. A crash between the two steps leaves two files for one
//! bucket. This module repairs that state before the bucket is next used:
//! duplicate files are merged into a single shard holding the multiset union
//! of their records, committed through the normal rename path, and the
//! leftovers deleted.
//!
//! Merging keys records by `(playerId, score)`: a record present in several
//! files counts once per occurrence in the largest file (a grown shard always
//! contains its predecessor's records), and records only a stale file knows
//! about are spliced back in at their normal insertion position.

use crate::catalog::ShardEntry;
use crate::error::Result;
use crate::shard;
use std::collections::HashMap;
use std::path::Path;

/// Collapse duplicate-bucket entries, returning a catalog with unique buckets.
///
/// `entries` must be sorted ascending by `(bucket, count)` (as produced by
/// [`crate::catalog::list`]). Worlds without duplicates pass through
/// untouched, without any I/O.
pub fn repair(world_dir: &Path, entries: Vec<ShardEntry>) -> Result<Vec<ShardEntry>> {
    let mut out = Vec::with_capacity(entries.len());
    let mut i = 0;
    while i < entries.len() {
        let mut j = i + 1;
        while j < entries.len() && entries[j].bucket == entries[i].bucket {
            j += 1;
        }
        if j - i == 1 {
            out.push(entries[i]);
        } else {
            out.push(merge_group(world_dir, &entries[i..j])?);
        }
        i = j;
    }
    Ok(out)
}

/// Merge one bucket's duplicate shard files into a single shard.
fn merge_group(world_dir: &Path, group: &[ShardEntry]) -> Result<ShardEntry> {
    let bucket = group[0].bucket;

    // The largest file is the furthest-advanced write; it becomes the base
    // and keeps its stored order.
    let base = group[group.len() - 1];
    let mut merged = shard::load(world_dir, bucket, base.count)?;

    let mut present: HashMap<(String, u64), u64> = HashMap::new();
    for r in &merged {
        *present.entry((r.player_id.clone(), r.score)).or_insert(0) += 1;
    }

    for stale in &group[..group.len() - 1] {
        let records = shard::load(world_dir, bucket, stale.count)?;
        // Compare this file against the merged multiset as it stood before
        // the file was examined, so its own occurrence counts are respected.
        let mut remaining = present.clone();
        for r in records {
            let key = (r.player_id.clone(), r.score);
            match remaining.get_mut(&key) {
                Some(n) if *n > 0 => {
                    *n -= 1;
                }
                _ => {
                    let idx = shard::insertion_index(&merged, r.score);
                    merged.insert(idx, r);
                    *present.entry(key).or_insert(0) += 1;
                }
            }
        }
    }

    let new_count = merged.len() as u64;
    shard::persist(world_dir, bucket, &merged)?;
    for e in group {
        if e.count != new_count {
            shard::remove(world_dir, bucket, e.count)?;
        }
    }

    tracing::warn!(
        bucket,
        files = group.len(),
        count = new_count,
        dir = ?world_dir,
        "merged duplicate shard files"
    );

    Ok(ShardEntry {
        bucket,
        count: new_count,
    })
}
