use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{MatchRow, PlayerRow};
use crate::shared::TournamentError;

/// Trait for the record store boundary: durable storage of players and
/// recorded matches.
///
/// Every compound write (`record_match`, the resets) is a single atomic
/// unit: either all of its effects become visible together or none do.
/// Reads observe one consistent snapshot of player state.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts a new player with zeroed counters and returns the
    /// store-assigned id. Duplicate names are permitted.
    async fn insert_player(&self, name: &str) -> Result<i64, TournamentError>;

    async fn count_players(&self) -> Result<i64, TournamentError>;

    async fn count_matches(&self) -> Result<i64, TournamentError>;

    /// Returns every registered player ordered by `wins` descending, ties
    /// broken by ascending id (registration order). The order is
    /// deterministic and reproducible for a fixed store state.
    async fn list_players_by_wins(&self) -> Result<Vec<PlayerRow>, TournamentError>;

    /// Atomically inserts a match row, increments the winner's `wins` and
    /// `matches_played`, and increments the loser's `matches_played`.
    /// Fails with `UnknownPlayer` if either id is not registered, leaving
    /// the store untouched.
    async fn record_match(
        &self,
        winner_id: i64,
        loser_id: i64,
    ) -> Result<MatchRow, TournamentError>;

    /// Deletes all match records and zeroes every player's counters in one
    /// atomic unit. Player identities and names survive.
    async fn delete_all_matches(&self) -> Result<(), TournamentError>;

    /// Deletes all players. Dependent match records are deleted first, in
    /// the same atomic unit, to uphold the match referential invariant.
    async fn delete_all_players(&self) -> Result<(), TournamentError>;
}

#[derive(Debug, Default)]
struct StoreState {
    players: BTreeMap<i64, PlayerRow>,
    matches: Vec<MatchRow>,
    next_player_id: i64,
    next_match_id: i64,
}

/// In-memory implementation of RecordStore for development and testing
///
/// Holds its mutex across every compound mutation, so each operation is
/// atomic and reads never observe a half-applied match. Data is lost when
/// the process exits.
pub struct InMemoryRecordStore {
    state: Mutex<StoreState>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    #[instrument(skip(self))]
    async fn insert_player(&self, name: &str) -> Result<i64, TournamentError> {
        let mut state = self.state.lock().unwrap();
        state.next_player_id += 1;
        let id = state.next_player_id;
        state.players.insert(
            id,
            PlayerRow {
                id,
                name: name.to_string(),
                wins: 0,
                matches_played: 0,
            },
        );

        debug!(player_id = id, player_name = %name, "Player inserted in memory");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn count_players(&self) -> Result<i64, TournamentError> {
        let state = self.state.lock().unwrap();
        Ok(state.players.len() as i64)
    }

    #[instrument(skip(self))]
    async fn count_matches(&self) -> Result<i64, TournamentError> {
        let state = self.state.lock().unwrap();
        Ok(state.matches.len() as i64)
    }

    #[instrument(skip(self))]
    async fn list_players_by_wins(&self) -> Result<Vec<PlayerRow>, TournamentError> {
        let state = self.state.lock().unwrap();

        // BTreeMap iteration yields ascending id; the stable sort keeps
        // that order among equal win counts.
        let mut players: Vec<PlayerRow> = state.players.values().cloned().collect();
        players.sort_by(|a, b| b.wins.cmp(&a.wins));

        debug!(player_count = players.len(), "Listed players by wins in memory");
        Ok(players)
    }

    #[instrument(skip(self))]
    async fn record_match(
        &self,
        winner_id: i64,
        loser_id: i64,
    ) -> Result<MatchRow, TournamentError> {
        let mut state = self.state.lock().unwrap();

        // Validate both ids before mutating anything, so a failed call
        // leaves the store exactly as it was.
        if !state.players.contains_key(&winner_id) {
            warn!(player_id = winner_id, "Match references unknown winner");
            return Err(TournamentError::UnknownPlayer(winner_id));
        }
        if !state.players.contains_key(&loser_id) {
            warn!(player_id = loser_id, "Match references unknown loser");
            return Err(TournamentError::UnknownPlayer(loser_id));
        }

        state.next_match_id += 1;
        let match_row = MatchRow {
            id: state.next_match_id,
            winner_id,
            loser_id,
            reported_at: Utc::now(),
        };
        state.matches.push(match_row.clone());

        if let Some(winner) = state.players.get_mut(&winner_id) {
            winner.wins += 1;
            winner.matches_played += 1;
        }
        if let Some(loser) = state.players.get_mut(&loser_id) {
            loser.matches_played += 1;
        }

        debug!(
            match_id = match_row.id,
            winner_id, loser_id, "Match recorded in memory"
        );
        Ok(match_row)
    }

    #[instrument(skip(self))]
    async fn delete_all_matches(&self) -> Result<(), TournamentError> {
        let mut state = self.state.lock().unwrap();

        let removed = state.matches.len();
        state.matches.clear();
        for player in state.players.values_mut() {
            player.wins = 0;
            player.matches_played = 0;
        }

        debug!(matches_removed = removed, "All matches deleted in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all_players(&self) -> Result<(), TournamentError> {
        let mut state = self.state.lock().unwrap();

        // Matches reference players, so they go first.
        state.matches.clear();
        let removed = state.players.len();
        state.players.clear();

        debug!(players_removed = removed, "All players deleted in memory");
        Ok(())
    }
}

/// PostgreSQL implementation of the record store
///
/// Table layout lives in `schema.sql` at the repository root. Compound
/// writes run inside a single transaction on the pool.
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a sqlx error onto the tournament error taxonomy. Integrity
/// violations (SQLSTATE class 23) become `ConstraintViolation`; everything
/// else is a transport-level `StoreUnavailable`.
fn store_error(e: sqlx::Error) -> TournamentError {
    match &e {
        sqlx::Error::Database(db) if db.code().map_or(false, |c| c.starts_with("23")) => {
            TournamentError::ConstraintViolation(db.message().to_string())
        }
        _ => TournamentError::StoreUnavailable(e.to_string()),
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    #[instrument(skip(self))]
    async fn insert_player(&self, name: &str) -> Result<i64, TournamentError> {
        debug!(player_name = %name, "Inserting player in database");

        let row = sqlx::query("INSERT INTO players (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to insert player in database");
                store_error(e)
            })?;

        let id: i64 = row.get("id");
        debug!(player_id = id, "Player inserted in database");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn count_players(&self) -> Result<i64, TournamentError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM players")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to count players in database");
                store_error(e)
            })?;

        Ok(row.get("count"))
    }

    #[instrument(skip(self))]
    async fn count_matches(&self) -> Result<i64, TournamentError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM matches")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to count matches in database");
                store_error(e)
            })?;

        Ok(row.get("count"))
    }

    #[instrument(skip(self))]
    async fn list_players_by_wins(&self) -> Result<Vec<PlayerRow>, TournamentError> {
        debug!("Listing players by wins from database");

        let rows = sqlx::query(
            "SELECT id, name, wins, matches_played FROM players ORDER BY wins DESC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list players from database");
            store_error(e)
        })?;

        let players = rows
            .into_iter()
            .map(|row| PlayerRow {
                id: row.get("id"),
                name: row.get("name"),
                wins: row.get("wins"),
                matches_played: row.get("matches_played"),
            })
            .collect();

        Ok(players)
    }

    #[instrument(skip(self))]
    async fn record_match(
        &self,
        winner_id: i64,
        loser_id: i64,
    ) -> Result<MatchRow, TournamentError> {
        debug!(winner_id, loser_id, "Recording match in database");

        let mut tx = self.pool.begin().await.map_err(store_error)?;

        // Counter updates run first: a zero-row update identifies exactly
        // which id is dangling, and the row locks they take keep the match
        // insert's foreign keys satisfiable until commit. Dropping the
        // transaction on the error path rolls everything back.
        let winner_update = sqlx::query(
            "UPDATE players SET wins = wins + 1, matches_played = matches_played + 1 WHERE id = $1",
        )
        .bind(winner_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            warn!(error = %e, winner_id, "Failed to update winner counters");
            store_error(e)
        })?;

        if winner_update.rows_affected() == 0 {
            warn!(player_id = winner_id, "Match references unknown winner");
            return Err(TournamentError::UnknownPlayer(winner_id));
        }

        let loser_update =
            sqlx::query("UPDATE players SET matches_played = matches_played + 1 WHERE id = $1")
                .bind(loser_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    warn!(error = %e, loser_id, "Failed to update loser counters");
                    store_error(e)
                })?;

        if loser_update.rows_affected() == 0 {
            warn!(player_id = loser_id, "Match references unknown loser");
            return Err(TournamentError::UnknownPlayer(loser_id));
        }

        let row = sqlx::query(
            "INSERT INTO matches (winner, loser) VALUES ($1, $2) RETURNING id, reported_at",
        )
        .bind(winner_id)
        .bind(loser_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            warn!(error = %e, winner_id, loser_id, "Failed to insert match in database");
            store_error(e)
        })?;

        let match_row = MatchRow {
            id: row.get("id"),
            winner_id,
            loser_id,
            reported_at: row.get("reported_at"),
        };

        tx.commit().await.map_err(store_error)?;

        debug!(match_id = match_row.id, "Match recorded in database");
        Ok(match_row)
    }

    #[instrument(skip(self))]
    async fn delete_all_matches(&self) -> Result<(), TournamentError> {
        debug!("Deleting all matches from database");

        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let result = sqlx::query("DELETE FROM matches")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete matches from database");
                store_error(e)
            })?;

        sqlx::query("UPDATE players SET wins = 0, matches_played = 0")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to zero player counters in database");
                store_error(e)
            })?;

        tx.commit().await.map_err(store_error)?;

        debug!(
            matches_removed = result.rows_affected(),
            "All matches deleted from database"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all_players(&self) -> Result<(), TournamentError> {
        debug!("Deleting all players from database");

        let mut tx = self.pool.begin().await.map_err(store_error)?;

        // Matches reference players, so they go first.
        sqlx::query("DELETE FROM matches")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete matches from database");
                store_error(e)
            })?;

        let result = sqlx::query("DELETE FROM players")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to delete players from database");
                store_error(e)
            })?;

        tx.commit().await.map_err(store_error)?;

        debug!(
            players_removed = result.rows_affected(),
            "All players deleted from database"
        );
        Ok(())
    }
}
