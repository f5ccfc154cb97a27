pub mod models;
pub mod pairing;
pub mod service;

pub use models::{Pairing, Standing};
pub use pairing::pair_adjacent;
pub use service::TournamentService;
