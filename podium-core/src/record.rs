//! The on-disk score record.

use serde::{Deserialize, Serialize};

/// One submitted score.
///
/// This is the unit stored inside a shard file. Records are immutable once
/// written; a later submission from the same player adds a new record rather
/// than editing this one.
///
/// The wire/disk field names are `playerId` and `score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Identity of the submitting player (the HTTP layer uses the caller's IP)
    #[serde(rename = "playerId")]
    pub player_id: String,

    /// The submitted score, >= 0
    pub score: u64,
}

impl ScoreRecord {
    /// Create a new record
    pub fn new(player_id: impl Into<String>, score: u64) -> Self {
        Self {
            player_id: player_id.into(),
            score,
        }
    }
}
