//! Global rank computation.
//!
//! Shards are internally sorted and partition disjoint score ranges, so the
//! number of players strictly ahead of a new record is the sum of the counts
//! of every strictly-higher bucket plus the record's insertion index inside
//! its own shard. Adding 1 converts to a 1-based rank.
//!
//! The catalog passed in must be the snapshot taken **before** the submission
//! being ranked was persisted; the submission's own presence is contributed
//! solely by its insertion index.

use crate::catalog::ShardEntry;

/// 1-based global rank of a record at `insertion_index` within `target_bucket`.
pub fn global_rank(entries: &[ShardEntry], target_bucket: u64, insertion_index: usize) -> u64 {
    let ahead: u64 = entries
        .iter()
        .filter(|e| e.bucket > target_bucket)
        .map(|e| e.count)
        .sum();
    1 + ahead + insertion_index as u64
}
