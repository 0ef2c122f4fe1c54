//! SQLite storage implementation for savings goals and transactions.

mod model;
mod repository;

pub use model::{SavingsGoalDB, SavingsTransactionDB};
pub use repository::SavingsRepository;
