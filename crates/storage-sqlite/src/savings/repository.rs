use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use suta_core::savings::{
    net_savings, plan_movement, plan_target_change, NewSavingsGoal, NewSavingsMovement,
    SavingsError, SavingsGoal, SavingsGoalUpdate, SavingsMovementResult,
    SavingsRepositoryTrait, SavingsTransaction, SavingsTransactionType,
    WithdrawalCompletionPolicy,
};
use suta_core::Result;

use super::model::{SavingsGoalDB, SavingsTransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{savings_goals, savings_transactions};
use crate::utils::parse_decimal;

pub struct SavingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SavingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Loads a goal on the given connection, failing with `GoalNotFound`.
fn load_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<SavingsGoal> {
    savings_goals::table
        .find(goal_id)
        .first::<SavingsGoalDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(SavingsGoal::try_from)
        .transpose()?
        .ok_or_else(|| SavingsError::GoalNotFound(goal_id.to_string()).into())
}

fn into_transactions(rows: Vec<SavingsTransactionDB>) -> Result<Vec<SavingsTransaction>> {
    rows.into_iter().map(SavingsTransaction::try_from).collect()
}

#[async_trait]
impl SavingsRepositoryTrait for SavingsRepository {
    fn get_goal(&self, goal_id: &str) -> Result<SavingsGoal> {
        let mut conn = get_connection(&self.pool)?;
        load_goal(&mut conn, goal_id)
    }

    fn list_goals_for_merchant(&self, merchant_id: &str) -> Result<Vec<SavingsGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_goals::table
            .filter(savings_goals::merchant_id.eq(merchant_id))
            .order(savings_goals::created_at.desc())
            .select(SavingsGoalDB::as_select())
            .load::<SavingsGoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(SavingsGoal::try_from).collect()
    }

    fn list_goal_transactions(
        &self,
        goal_id: &str,
        limit: i64,
    ) -> Result<Vec<SavingsTransaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_transactions::table
            .filter(savings_transactions::savings_goal_id.eq(goal_id))
            .order(savings_transactions::created_at.desc())
            .limit(limit)
            .select(SavingsTransactionDB::as_select())
            .load::<SavingsTransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_transactions(rows)
    }

    fn list_merchant_transactions(
        &self,
        merchant_id: &str,
        limit: i64,
    ) -> Result<Vec<SavingsTransaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_transactions::table
            .filter(savings_transactions::merchant_id.eq(merchant_id))
            .order(savings_transactions::created_at.desc())
            .limit(limit)
            .select(SavingsTransactionDB::as_select())
            .load::<SavingsTransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_transactions(rows)
    }

    fn get_net_savings(&self, merchant_id: &str) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let rows = savings_transactions::table
            .filter(savings_transactions::merchant_id.eq(merchant_id))
            .select((
                savings_transactions::transaction_type,
                savings_transactions::amount,
            ))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let entries = rows
            .into_iter()
            .map(|(kind, amount)| -> Result<(SavingsTransactionType, Decimal)> {
                Ok((
                    SavingsTransactionType::from_str(&kind)?,
                    parse_decimal(&amount, "amount")?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        net_savings(entries)
    }

    async fn insert_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal> {
        let now = Utc::now().naive_utc();
        let goal = SavingsGoal {
            id: new_goal.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            merchant_id: new_goal.merchant_id,
            name: new_goal.name,
            target_amount: new_goal.target_amount,
            current_amount: Decimal::ZERO,
            is_completed: false,
            completed_at: None,
            deadline: new_goal.deadline,
            created_at: now,
            updated_at: now,
        };
        let goal_db = SavingsGoalDB::from(goal);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsGoal> {
                let inserted = diesel::insert_into(savings_goals::table)
                    .values(&goal_db)
                    .returning(SavingsGoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                SavingsGoal::try_from(inserted)
            })
            .await
    }

    async fn update_goal(
        &self,
        goal_id: String,
        update: SavingsGoalUpdate,
    ) -> Result<SavingsGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsGoal> {
                let mut goal = load_goal(conn, &goal_id)?;
                let now = Utc::now().naive_utc();

                if let Some(name) = update.name {
                    goal.name = name;
                }
                if let Some(deadline) = update.deadline {
                    goal.deadline = Some(deadline);
                }
                if let Some(target) = update.target_amount {
                    let balance = plan_target_change(&goal, target, now);
                    goal.target_amount = target;
                    goal.is_completed = balance.is_completed;
                    goal.completed_at = balance.completed_at;
                }
                goal.updated_at = now;

                let goal_db = SavingsGoalDB::from(goal);
                let updated = diesel::update(savings_goals::table.find(goal_id.as_str()))
                    .set(&goal_db)
                    .returning(SavingsGoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                SavingsGoal::try_from(updated)
            })
            .await
    }

    async fn delete_goal(&self, goal_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(savings_goals::table.find(goal_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn record_movement(
        &self,
        movement: NewSavingsMovement,
        policy: WithdrawalCompletionPolicy,
    ) -> Result<SavingsMovementResult> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<SavingsMovementResult> {
                    // The balance check and both writes share one IMMEDIATE transaction.
                    let mut goal = load_goal(conn, &movement.savings_goal_id)?;
                    let now = Utc::now().naive_utc();
                    let balance = plan_movement(&goal, &movement, now, policy)?;

                    let transaction = SavingsTransaction {
                        id: Uuid::new_v4().to_string(),
                        savings_goal_id: movement.savings_goal_id,
                        merchant_id: movement.merchant_id,
                        amount: movement.amount,
                        transaction_type: movement.transaction_type,
                        source: movement.source,
                        notes: movement.notes,
                        created_at: now,
                    };
                    let transaction_db = SavingsTransactionDB::from(transaction.clone());
                    diesel::insert_into(savings_transactions::table)
                        .values(&transaction_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    goal.current_amount = balance.current_amount;
                    goal.is_completed = balance.is_completed;
                    goal.completed_at = balance.completed_at;
                    goal.updated_at = now;

                    let goal_db = SavingsGoalDB::from(goal.clone());
                    diesel::update(savings_goals::table.find(goal.id.as_str()))
                        .set(&goal_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    Ok(SavingsMovementResult {
                        new_amount: goal.current_amount,
                        goal,
                        transaction,
                    })
                },
            )
            .await
    }
}
