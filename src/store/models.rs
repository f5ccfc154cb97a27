use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered player as persisted by the record store.
///
/// `wins` and `matches_played` are maintained counters, mutated only when a
/// match is recorded and zeroed only by a full match reset.
/// Invariant: `0 <= wins <= matches_played`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: i64,
    pub name: String,
    pub wins: i32,
    pub matches_played: i32,
}

/// A recorded match outcome. Written exactly once, never updated, deleted
/// only by a full reset. `winner_id != loser_id` and both ids reference
/// players that existed at recording time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRow {
    pub id: i64,
    pub winner_id: i64,
    pub loser_id: i64,
    pub reported_at: DateTime<Utc>,
}
