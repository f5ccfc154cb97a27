pub mod models;
pub mod repository;

pub use models::{MatchRow, PlayerRow};
pub use repository::{InMemoryRecordStore, PostgresRecordStore, RecordStore};
