//! Savings domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a savings goal (cagnotte).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub merchant_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDateTime>,
    pub deadline: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsGoal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub merchant_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDateTime>,
}

impl NewSavingsGoal {
    /// Validates the new goal data.
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "merchantId".to_string(),
            )));
        }
        validate_goal_name(&self.name)?;
        validate_target_amount(self.target_amount)
    }
}

/// Partial update of a savings goal. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub deadline: Option<NaiveDateTime>,
}

impl SavingsGoalUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_goal_name(name)?;
        }
        if let Some(target) = self.target_amount {
            validate_target_amount(target)?;
        }
        Ok(())
    }
}

fn validate_goal_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Savings goal name cannot be empty".to_string(),
        )));
    }
    Ok(())
}

fn validate_target_amount(target: Decimal) -> Result<()> {
    if target <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Target amount must be positive, got {}",
            target
        ))));
    }
    Ok(())
}

/// Direction of a ledger movement. The stored amount is always a positive
/// magnitude; the sign comes from the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsTransactionType {
    Deposit,
    Withdrawal,
}

impl SavingsTransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavingsTransactionType::Deposit => "deposit",
            SavingsTransactionType::Withdrawal => "withdrawal",
        }
    }

    /// Net effect of `amount` on a goal balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            SavingsTransactionType::Deposit => amount,
            SavingsTransactionType::Withdrawal => -amount,
        }
    }
}

impl fmt::Display for SavingsTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SavingsTransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deposit" => Ok(SavingsTransactionType::Deposit),
            "withdrawal" => Ok(SavingsTransactionType::Withdrawal),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown savings transaction type '{}'",
                other
            )))),
        }
    }
}

/// Append-only ledger entry against a savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsTransaction {
    pub id: String,
    pub savings_goal_id: String,
    pub merchant_id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: SavingsTransactionType,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A deposit or withdrawal requested against a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsMovement {
    pub savings_goal_id: String,
    pub merchant_id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: SavingsTransactionType,
    pub source: Option<String>,
    pub notes: Option<String>,
}

/// Outcome of a committed deposit or withdrawal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsMovementResult {
    pub new_amount: Decimal,
    pub goal: SavingsGoal,
    pub transaction: SavingsTransaction,
}

/// Aggregated savings figures for one merchant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsStats {
    pub total_savings: Decimal,
    pub total_goals: usize,
    pub active_goals: usize,
    pub completed_goals: usize,
    pub total_target: Decimal,
    pub total_current: Decimal,
    /// Rounded percentage of all targets reached; may exceed 100.
    pub overall_progress: i64,
}

/// What a withdrawal does to a goal's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WithdrawalCompletionPolicy {
    /// Every withdrawal reopens the goal, even if the remaining balance
    /// still meets the target.
    #[default]
    AlwaysReopen,
    /// Completion is re-derived from the post-withdrawal balance.
    Reevaluate,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSettings {
    pub withdrawal_completion: WithdrawalCompletionPolicy,
}
