// Library crate for the Swiss-system tournament core
// This file exposes the public API for integration tests

pub mod shared;
pub mod store;
pub mod tournament;

// Re-export commonly used types for easier access in tests
pub use shared::TournamentError;
pub use store::{InMemoryRecordStore, MatchRow, PlayerRow, PostgresRecordStore, RecordStore};
pub use tournament::{Pairing, Standing, TournamentService};
