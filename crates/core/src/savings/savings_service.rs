use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::savings_constants::{
    DEFAULT_DEPOSIT_SOURCE, DEFAULT_GOAL_TRANSACTIONS_LIMIT, DEFAULT_MERCHANT_TRANSACTIONS_LIMIT,
};
use super::savings_errors::SavingsError;
use super::savings_ledger::{ensure_positive_amount, summarize_goals};
use super::savings_model::{
    NewSavingsGoal, NewSavingsMovement, SavingsGoal, SavingsGoalUpdate, SavingsMovementResult,
    SavingsSettings, SavingsStats, SavingsTransaction, SavingsTransactionType,
};
use super::savings_traits::{SavingsRepositoryTrait, SavingsServiceTrait};
use crate::errors::{Error, Result};

/// Service for savings goals and their ledger.
pub struct SavingsService {
    repository: Arc<dyn SavingsRepositoryTrait>,
    settings: SavingsSettings,
}

impl SavingsService {
    pub fn new(repository: Arc<dyn SavingsRepositoryTrait>, settings: SavingsSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    async fn apply(&self, movement: NewSavingsMovement) -> Result<SavingsMovementResult> {
        ensure_positive_amount(movement.amount)?;

        let goal_id = movement.savings_goal_id.clone();
        let kind = movement.transaction_type;
        let amount = movement.amount;

        let result = self
            .repository
            .record_movement(movement, self.settings.withdrawal_completion)
            .await;

        match &result {
            Ok(outcome) => info!(
                "Recorded {} of {} on savings goal {}; balance now {}",
                kind, amount, goal_id, outcome.new_amount
            ),
            Err(Error::Savings(SavingsError::InsufficientFunds {
                available,
                requested,
                ..
            })) => warn!(
                "Rejected withdrawal of {} from savings goal {}: only {} available",
                requested, goal_id, available
            ),
            Err(_) => {}
        }

        result
    }
}

#[async_trait::async_trait]
impl SavingsServiceTrait for SavingsService {
    async fn create_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal> {
        new_goal.validate()?;
        debug!(
            "Creating savings goal '{}' for merchant {}",
            new_goal.name, new_goal.merchant_id
        );
        self.repository.insert_goal(new_goal).await
    }

    fn get_goals(&self, merchant_id: &str) -> Result<Vec<SavingsGoal>> {
        self.repository.list_goals_for_merchant(merchant_id)
    }

    fn get_goal(&self, goal_id: &str) -> Result<SavingsGoal> {
        self.repository.get_goal(goal_id)
    }

    async fn update_goal(&self, goal_id: &str, update: SavingsGoalUpdate) -> Result<SavingsGoal> {
        update.validate()?;
        self.repository
            .update_goal(goal_id.to_string(), update)
            .await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        let deleted = self.repository.delete_goal(goal_id.to_string()).await?;
        if deleted == 0 {
            return Err(SavingsError::GoalNotFound(goal_id.to_string()).into());
        }
        info!("Deleted savings goal {} and its transactions", goal_id);
        Ok(())
    }

    async fn add_deposit(
        &self,
        goal_id: &str,
        merchant_id: &str,
        amount: Decimal,
        source: Option<String>,
        notes: Option<String>,
    ) -> Result<SavingsMovementResult> {
        self.apply(NewSavingsMovement {
            savings_goal_id: goal_id.to_string(),
            merchant_id: merchant_id.to_string(),
            amount,
            transaction_type: SavingsTransactionType::Deposit,
            source: Some(source.unwrap_or_else(|| DEFAULT_DEPOSIT_SOURCE.to_string())),
            notes,
        })
        .await
    }

    async fn withdraw(
        &self,
        goal_id: &str,
        merchant_id: &str,
        amount: Decimal,
        notes: Option<String>,
    ) -> Result<SavingsMovementResult> {
        self.apply(NewSavingsMovement {
            savings_goal_id: goal_id.to_string(),
            merchant_id: merchant_id.to_string(),
            amount,
            transaction_type: SavingsTransactionType::Withdrawal,
            source: None,
            notes,
        })
        .await
    }

    fn get_goal_transactions(
        &self,
        goal_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<SavingsTransaction>> {
        self.repository
            .list_goal_transactions(goal_id, limit.unwrap_or(DEFAULT_GOAL_TRANSACTIONS_LIMIT))
    }

    fn get_merchant_transactions(
        &self,
        merchant_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<SavingsTransaction>> {
        self.repository.list_merchant_transactions(
            merchant_id,
            limit.unwrap_or(DEFAULT_MERCHANT_TRANSACTIONS_LIMIT),
        )
    }

    fn get_total_savings(&self, merchant_id: &str) -> Result<Decimal> {
        self.repository.get_net_savings(merchant_id)
    }

    fn get_savings_stats(&self, merchant_id: &str) -> Result<SavingsStats> {
        let total_savings = self.repository.get_net_savings(merchant_id)?;
        let goals = self.repository.list_goals_for_merchant(merchant_id)?;
        summarize_goals(&goals, total_savings)
    }
}
