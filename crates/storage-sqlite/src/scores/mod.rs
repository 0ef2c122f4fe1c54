//! SQLite storage implementation for SUTA score snapshots and history.

mod model;
mod repository;

pub use model::{MerchantScoreDB, ScoreHistoryDB};
pub use repository::ScoreRepository;
