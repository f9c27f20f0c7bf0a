//! Shard filename codec.
//!
//! A shard file is identified on disk by its bucket and record count, encoded
//! as `"<bucket> - <count>.json"` (e.g. `"1000 - 20.json"` holds 20 records
//! with scores in `[1000, 2000)`). The count is part of the name so rank sums
//! can be computed from a directory listing alone, without opening any file.
//!
//! Parsing is strict: a name must round-trip to itself (no signs, no leading
//! zeros, single `" - "` separator) and the bucket must be aligned to the
//! bucket width. Anything else is treated as corruption by the catalog.

use crate::bucket;
use crate::error::{Error, Result};

/// File extension used by shard files.
pub const SHARD_EXT: &str = ".json";

/// Separator between the bucket and count fields.
const FIELD_SEP: &str = " - ";

/// Format the filename for a shard of `bucket` holding `count` records.
pub fn format(bucket: u64, count: u64) -> String {
    format!("{}{}{}{}", bucket, FIELD_SEP, count, SHARD_EXT)
}

/// Parse a shard filename into `(bucket, count)`.
///
/// Returns `Error::InvalidShardName` for anything that is not a canonical
/// two-field encoding with an aligned bucket.
pub fn parse(name: &str) -> Result<(u64, u64)> {
    let stem = name
        .strip_suffix(SHARD_EXT)
        .ok_or_else(|| Error::invalid_shard_name(name))?;

    let (bucket_part, count_part) = stem
        .split_once(FIELD_SEP)
        .ok_or_else(|| Error::invalid_shard_name(name))?;

    let bucket_val: u64 = bucket_part
        .parse()
        .map_err(|_| Error::invalid_shard_name(name))?;
    let count: u64 = count_part
        .parse()
        .map_err(|_| Error::invalid_shard_name(name))?;

    if !bucket::is_aligned(bucket_val) {
        return Err(Error::invalid_shard_name(name));
    }

    // Reject non-canonical spellings ("+1000", "007") so the name can always
    // be reconstructed from the parsed fields.
    if format(bucket_val, count) != name {
        return Err(Error::invalid_shard_name(name));
    }

    Ok((bucket_val, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_bucket_and_count() {
        assert_eq!(format(1000, 20), "1000 - 20.json");
        assert_eq!(format(0, 1), "0 - 1.json");
    }

    #[test]
    fn parses_canonical_names() {
        assert_eq!(parse("1000 - 20.json").unwrap(), (1000, 20));
        assert_eq!(parse("0 - 1.json").unwrap(), (0, 1));
    }

    #[test]
    fn rejects_malformed_names() {
        for name in [
            "scores.json",
            "1000-20.json",
            "1000 - 20",
            "1000 - 20.json.bak",
            "1000 - .json",
            " - 20.json",
            "1000 - 20 - 3.json",
        ] {
            assert!(parse(name).is_err(), "should reject {name:?}");
        }
    }

    #[test]
    fn rejects_unaligned_bucket() {
        assert!(parse("1500 - 3.json").is_err());
    }

    #[test]
    fn rejects_non_canonical_numbers() {
        assert!(parse("+1000 - 2.json").is_err());
        assert!(parse("01000 - 2.json").is_err());
        assert!(parse("1000 - 02.json").is_err());
    }
}
