use thiserror::Error;

/// Error taxonomy for the tournament core.
///
/// A failed write leaves player and match state as if the call never
/// happened; no operation partial-fails silently. There is no automatic
/// retry: mutating operations are not safely idempotent to retry blindly.
#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid match: player {0} cannot play against themselves")]
    InvalidMatch(i64),

    #[error("Unknown player id: {0}")]
    UnknownPlayer(i64),

    #[error("Store constraint violation: {0}")]
    ConstraintViolation(String),
}
