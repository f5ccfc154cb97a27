use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::models::{Pairing, Standing};
use super::pairing::pair_adjacent;
use crate::shared::TournamentError;
use crate::store::{MatchRow, RecordStore};

/// Coordinates the tournament core over a record store: registration,
/// match recording, standings, and next-round pairings.
///
/// Holds no state of its own between calls. Every query reads the current
/// store snapshot and computes a fresh result; every mutation is one
/// atomic store operation.
pub struct TournamentService {
    store: Arc<dyn RecordStore>,
}

impl TournamentService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Registers a player with zeroed counters and returns the
    /// store-assigned id. Names need not be unique and are never
    /// deduplicated.
    #[instrument(skip(self))]
    pub async fn register_player(&self, name: &str) -> Result<i64, TournamentError> {
        let id = self.store.insert_player(name).await?;
        info!(player_id = id, player_name = %name, "Player registered");
        Ok(id)
    }

    /// Number of currently registered players.
    pub async fn count_players(&self) -> Result<i64, TournamentError> {
        self.store.count_players().await
    }

    /// Number of recorded matches.
    pub async fn count_matches(&self) -> Result<i64, TournamentError> {
        self.store.count_matches().await
    }

    /// Current standings: every registered player exactly once, ordered by
    /// wins descending with ties broken by registration order.
    #[instrument(skip(self))]
    pub async fn standings(&self) -> Result<Vec<Standing>, TournamentError> {
        let players = self.store.list_players_by_wins().await?;
        let standings = players.into_iter().map(Standing::from).collect();
        Ok(standings)
    }

    /// Proposes the next round by pairing adjacent players in the current
    /// standings. With an odd player count the lowest-ranked player is
    /// left out; see [`pair_adjacent`].
    #[instrument(skip(self))]
    pub async fn next_round_pairings(&self) -> Result<Vec<Pairing>, TournamentError> {
        let standings = self.standings().await?;
        let pairings = pair_adjacent(&standings);

        debug!(
            player_count = standings.len(),
            pairing_count = pairings.len(),
            "Next round pairings computed"
        );
        Ok(pairings)
    }

    /// Records the outcome of one match between two registered players.
    ///
    /// Rejects a self-match with `InvalidMatch` before touching the store.
    /// The store applies the match insert and both counter updates as one
    /// atomic unit, so a dangling id (`UnknownPlayer`) leaves no trace.
    /// Recorded results are never retracted or edited.
    #[instrument(skip(self))]
    pub async fn report_match(
        &self,
        winner_id: i64,
        loser_id: i64,
    ) -> Result<MatchRow, TournamentError> {
        if winner_id == loser_id {
            warn!(player_id = winner_id, "Rejecting self-match report");
            return Err(TournamentError::InvalidMatch(winner_id));
        }

        let match_row = self.store.record_match(winner_id, loser_id).await?;
        info!(
            match_id = match_row.id,
            winner_id, loser_id, "Match reported"
        );
        Ok(match_row)
    }

    /// Deletes every match record and zeroes every player's counters.
    /// Player identities and names survive.
    #[instrument(skip(self))]
    pub async fn reset_matches(&self) -> Result<(), TournamentError> {
        self.store.delete_all_matches().await?;
        info!("All matches reset");
        Ok(())
    }

    /// Deletes every player. Dependent matches are removed first so no
    /// match ever references a deleted player.
    #[instrument(skip(self))]
    pub async fn reset_players(&self) -> Result<(), TournamentError> {
        self.store.delete_all_players().await?;
        info!("All players reset");
        Ok(())
    }
}
