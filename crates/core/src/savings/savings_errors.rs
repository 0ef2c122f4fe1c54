use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SavingsError {
    #[error("Savings goal not found: {0}")]
    GoalNotFound(String),

    #[error("Insufficient funds in goal {goal_id}: available {available}, requested {requested}")]
    InsufficientFunds {
        goal_id: String,
        available: Decimal,
        requested: Decimal,
    },
}
