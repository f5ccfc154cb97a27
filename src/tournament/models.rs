use serde::{Deserialize, Serialize};

use crate::store::PlayerRow;

/// One player's place in the current standings: a projection of player
/// state, recomputed from the store on every query and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: i64,
    pub name: String,
    pub wins: i32,
    pub matches_played: i32,
}

impl From<PlayerRow> for Standing {
    fn from(player: PlayerRow) -> Self {
        Self {
            id: player.id,
            name: player.name,
            wins: player.wins,
            matches_played: player.matches_played,
        }
    }
}

/// A proposed match for the next round. Produced fresh on each pairing
/// call and never persisted. `id1`/`name1` is the higher-ranked player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub id1: i64,
    pub name1: String,
    pub id2: i64,
    pub name2: String,
}
