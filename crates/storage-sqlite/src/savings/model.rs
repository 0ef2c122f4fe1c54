//! Database models for savings goals and their ledger.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::str::FromStr;

use suta_core::errors::Error;
use suta_core::savings::{SavingsGoal, SavingsTransaction, SavingsTransactionType};

use crate::utils::parse_decimal;

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::savings_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct SavingsGoalDB {
    pub id: String,
    pub merchant_id: String,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDateTime>,
    pub deadline: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::savings_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SavingsTransactionDB {
    pub id: String,
    pub savings_goal_id: String,
    pub merchant_id: String,
    pub amount: String,
    pub transaction_type: String,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<SavingsGoalDB> for SavingsGoal {
    type Error = Error;

    fn try_from(db: SavingsGoalDB) -> Result<Self, Self::Error> {
        Ok(Self {
            target_amount: parse_decimal(&db.target_amount, "target_amount")?,
            current_amount: parse_decimal(&db.current_amount, "current_amount")?,
            id: db.id,
            merchant_id: db.merchant_id,
            name: db.name,
            is_completed: db.is_completed,
            completed_at: db.completed_at,
            deadline: db.deadline,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<SavingsGoal> for SavingsGoalDB {
    fn from(domain: SavingsGoal) -> Self {
        Self {
            id: domain.id,
            merchant_id: domain.merchant_id,
            name: domain.name,
            target_amount: domain.target_amount.to_string(),
            current_amount: domain.current_amount.to_string(),
            is_completed: domain.is_completed,
            completed_at: domain.completed_at,
            deadline: domain.deadline,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl TryFrom<SavingsTransactionDB> for SavingsTransaction {
    type Error = Error;

    fn try_from(db: SavingsTransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_type: SavingsTransactionType::from_str(&db.transaction_type)?,
            amount: parse_decimal(&db.amount, "amount")?,
            id: db.id,
            savings_goal_id: db.savings_goal_id,
            merchant_id: db.merchant_id,
            source: db.source,
            notes: db.notes,
            created_at: db.created_at,
        })
    }
}

impl From<SavingsTransaction> for SavingsTransactionDB {
    fn from(domain: SavingsTransaction) -> Self {
        Self {
            id: domain.id,
            savings_goal_id: domain.savings_goal_id,
            merchant_id: domain.merchant_id,
            amount: domain.amount.to_string(),
            transaction_type: domain.transaction_type.as_str().to_string(),
            source: domain.source,
            notes: domain.notes,
            created_at: domain.created_at,
        }
    }
}
