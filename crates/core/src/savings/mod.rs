//! Savings module - cagnotte goals, their append-only ledger, and services.

mod savings_constants;
mod savings_errors;
mod savings_ledger;
mod savings_model;
mod savings_service;
mod savings_traits;

#[cfg(test)]
mod savings_service_tests;

pub use savings_constants::*;
pub use savings_errors::SavingsError;
pub use savings_ledger::{
    checked_total, ensure_positive_amount, net_savings, plan_deposit, plan_movement,
    plan_target_change, plan_withdrawal, summarize_goals, GoalBalanceUpdate,
};
pub use savings_model::{
    NewSavingsGoal, NewSavingsMovement, SavingsGoal, SavingsGoalUpdate, SavingsMovementResult,
    SavingsSettings, SavingsStats, SavingsTransaction, SavingsTransactionType,
    WithdrawalCompletionPolicy,
};
pub use savings_service::SavingsService;
pub use savings_traits::{SavingsRepositoryTrait, SavingsServiceTrait};
