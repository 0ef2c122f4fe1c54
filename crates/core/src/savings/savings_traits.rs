use async_trait::async_trait;
use rust_decimal::Decimal;

use super::savings_model::{
    NewSavingsGoal, NewSavingsMovement, SavingsGoal, SavingsGoalUpdate, SavingsMovementResult,
    SavingsStats, SavingsTransaction, WithdrawalCompletionPolicy,
};
use crate::errors::Result;

/// Trait for savings ledger repository operations.
///
/// Every async method is a write and must be atomic: `record_movement` in
/// particular appends the ledger entry and updates the goal balance in a
/// single transaction, re-reading the goal inside that transaction.
#[async_trait]
pub trait SavingsRepositoryTrait: Send + Sync {
    /// Fails with `SavingsError::GoalNotFound` when the goal does not exist.
    fn get_goal(&self, goal_id: &str) -> Result<SavingsGoal>;
    /// Newest first.
    fn list_goals_for_merchant(&self, merchant_id: &str) -> Result<Vec<SavingsGoal>>;
    fn list_goal_transactions(&self, goal_id: &str, limit: i64)
        -> Result<Vec<SavingsTransaction>>;
    fn list_merchant_transactions(
        &self,
        merchant_id: &str,
        limit: i64,
    ) -> Result<Vec<SavingsTransaction>>;
    /// All-time `deposits - withdrawals` for the merchant.
    fn get_net_savings(&self, merchant_id: &str) -> Result<Decimal>;

    async fn insert_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal>;
    async fn update_goal(&self, goal_id: String, update: SavingsGoalUpdate)
        -> Result<SavingsGoal>;
    /// Removes the goal and, by cascade, its transactions.
    async fn delete_goal(&self, goal_id: String) -> Result<usize>;
    async fn record_movement(
        &self,
        movement: NewSavingsMovement,
        policy: WithdrawalCompletionPolicy,
    ) -> Result<SavingsMovementResult>;
}

/// Trait for savings service operations
#[async_trait]
pub trait SavingsServiceTrait: Send + Sync {
    async fn create_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal>;
    fn get_goals(&self, merchant_id: &str) -> Result<Vec<SavingsGoal>>;
    fn get_goal(&self, goal_id: &str) -> Result<SavingsGoal>;
    async fn update_goal(&self, goal_id: &str, update: SavingsGoalUpdate) -> Result<SavingsGoal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<()>;

    async fn add_deposit(
        &self,
        goal_id: &str,
        merchant_id: &str,
        amount: Decimal,
        source: Option<String>,
        notes: Option<String>,
    ) -> Result<SavingsMovementResult>;
    async fn withdraw(
        &self,
        goal_id: &str,
        merchant_id: &str,
        amount: Decimal,
        notes: Option<String>,
    ) -> Result<SavingsMovementResult>;

    fn get_goal_transactions(
        &self,
        goal_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<SavingsTransaction>>;
    fn get_merchant_transactions(
        &self,
        merchant_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<SavingsTransaction>>;
    fn get_total_savings(&self, merchant_id: &str) -> Result<Decimal>;
    fn get_savings_stats(&self, merchant_id: &str) -> Result<SavingsStats>;
}
