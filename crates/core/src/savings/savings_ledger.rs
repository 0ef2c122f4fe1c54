//! Balance transitions for savings goals.
//!
//! Storage implementations call these from inside their write transaction so
//! that the precondition checks and the mutation observe the same balance.

use chrono::NaiveDateTime;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::savings_errors::SavingsError;
use super::savings_model::{
    NewSavingsMovement, SavingsGoal, SavingsStats, SavingsTransactionType,
    WithdrawalCompletionPolicy,
};
use crate::errors::{Error, Result, ValidationError};

/// New balance and completion state for a goal after a movement.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalBalanceUpdate {
    pub current_amount: Decimal,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDateTime>,
}

pub fn ensure_positive_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Amount must be strictly positive, got {}",
            amount
        ))));
    }
    Ok(())
}

fn amount_overflow(what: &str) -> Error {
    Error::Validation(ValidationError::InvalidInput(format!(
        "{} exceeds the largest representable amount",
        what
    )))
}

/// `completed_at` is stamped only on the transition into completed.
fn completion_state(
    goal: &SavingsGoal,
    balance: Decimal,
    target: Decimal,
    now: NaiveDateTime,
) -> (bool, Option<NaiveDateTime>) {
    if balance >= target {
        let completed_at = if goal.is_completed {
            goal.completed_at.or(Some(now))
        } else {
            Some(now)
        };
        (true, completed_at)
    } else {
        (false, None)
    }
}

pub fn plan_deposit(
    goal: &SavingsGoal,
    amount: Decimal,
    now: NaiveDateTime,
) -> Result<GoalBalanceUpdate> {
    ensure_positive_amount(amount)?;

    let current_amount = goal
        .current_amount
        .checked_add(amount)
        .ok_or_else(|| amount_overflow("Goal balance"))?;
    let (is_completed, completed_at) =
        completion_state(goal, current_amount, goal.target_amount, now);

    Ok(GoalBalanceUpdate {
        current_amount,
        is_completed,
        completed_at,
    })
}

pub fn plan_withdrawal(
    goal: &SavingsGoal,
    amount: Decimal,
    now: NaiveDateTime,
    policy: WithdrawalCompletionPolicy,
) -> Result<GoalBalanceUpdate> {
    ensure_positive_amount(amount)?;

    if goal.current_amount < amount {
        return Err(SavingsError::InsufficientFunds {
            goal_id: goal.id.clone(),
            available: goal.current_amount,
            requested: amount,
        }
        .into());
    }

    let current_amount = goal.current_amount - amount;
    let (is_completed, completed_at) = match policy {
        WithdrawalCompletionPolicy::AlwaysReopen => (false, None),
        WithdrawalCompletionPolicy::Reevaluate => {
            completion_state(goal, current_amount, goal.target_amount, now)
        }
    };

    Ok(GoalBalanceUpdate {
        current_amount,
        is_completed,
        completed_at,
    })
}

/// Re-derives completion when a goal's target is edited.
pub fn plan_target_change(
    goal: &SavingsGoal,
    new_target: Decimal,
    now: NaiveDateTime,
) -> GoalBalanceUpdate {
    let (is_completed, completed_at) =
        completion_state(goal, goal.current_amount, new_target, now);
    GoalBalanceUpdate {
        current_amount: goal.current_amount,
        is_completed,
        completed_at,
    }
}

/// Validates ownership and dispatches on the movement type.
pub fn plan_movement(
    goal: &SavingsGoal,
    movement: &NewSavingsMovement,
    now: NaiveDateTime,
    policy: WithdrawalCompletionPolicy,
) -> Result<GoalBalanceUpdate> {
    if goal.merchant_id != movement.merchant_id {
        return Err(SavingsError::GoalNotFound(goal.id.clone()).into());
    }

    match movement.transaction_type {
        SavingsTransactionType::Deposit => plan_deposit(goal, movement.amount, now),
        SavingsTransactionType::Withdrawal => {
            plan_withdrawal(goal, movement.amount, now, policy)
        }
    }
}

/// `sum(deposits) - sum(withdrawals)`; zero for an empty ledger.
pub fn net_savings<I>(entries: I) -> Result<Decimal>
where
    I: IntoIterator<Item = (SavingsTransactionType, Decimal)>,
{
    entries
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, (kind, amount)| {
            acc.checked_add(kind.signed(amount))
                .ok_or_else(|| amount_overflow("Net savings"))
        })
}

/// Checked sum over a set of amounts.
pub fn checked_total<I>(amounts: I, what: &str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).ok_or_else(|| amount_overflow(what))
    })
}

pub fn summarize_goals(goals: &[SavingsGoal], total_savings: Decimal) -> Result<SavingsStats> {
    let completed_goals = goals.iter().filter(|g| g.is_completed).count();
    let total_target = checked_total(goals.iter().map(|g| g.target_amount), "Total target")?;
    let total_current = checked_total(goals.iter().map(|g| g.current_amount), "Total saved")?;

    let overall_progress = if total_target > Decimal::ZERO {
        // Divide first when scaling by 100 would not fit.
        let ratio = match total_current.checked_mul(Decimal::ONE_HUNDRED) {
            Some(scaled) => scaled / total_target,
            None => (total_current / total_target)
                .checked_mul(Decimal::ONE_HUNDRED)
                .ok_or_else(|| amount_overflow("Overall progress"))?,
        };
        ratio
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
    } else {
        0
    };

    Ok(SavingsStats {
        total_savings,
        total_goals: goals.len(),
        active_goals: goals.len() - completed_goals,
        completed_goals,
        total_target,
        total_current,
        overall_progress,
    })
}
