//! World-id validation.
//!
//! A world names an independently ranked leaderboard and doubles as a
//! directory name under the store's data root, so the rules are deliberately
//! narrow: 1-64 characters from `[A-Za-z0-9._-]`, not starting with a dot.
//! This keeps ids safe to join onto a path (no separators, no traversal) and
//! keeps the store's own dotfile artifacts out of the world namespace.

use crate::error::{Error, Result};

/// Maximum accepted world-id length.
pub const MAX_WORLD_ID_LEN: usize = 64;

/// Validate a world id, returning it unchanged on success.
pub fn validate(world_id: &str) -> Result<&str> {
    if world_id.is_empty() {
        return Err(Error::invalid_world("empty"));
    }
    if world_id.len() > MAX_WORLD_ID_LEN {
        return Err(Error::invalid_world(format!(
            "'{}': longer than {} characters",
            world_id, MAX_WORLD_ID_LEN
        )));
    }
    if world_id.starts_with('.') {
        return Err(Error::invalid_world(format!(
            "'{}': must not start with '.'",
            world_id
        )));
    }
    if let Some(bad) = world_id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(Error::invalid_world(format!(
            "'{}': character {:?} not allowed",
            world_id, bad
        )));
    }
    Ok(world_id)
}

/// Whether a world id is valid.
pub fn is_valid(world_id: &str) -> bool {
    validate(world_id).is_ok()
}
