//! Database models for score snapshots and history.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::str::FromStr;

use suta_core::errors::Error;
use suta_core::scores::{CreditTier, MerchantScore, ScoreHistoryEntry};

use crate::utils::parse_decimal;

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::merchant_scores)]
#[diesel(primary_key(merchant_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MerchantScoreDB {
    pub merchant_id: String,
    pub total_score: i32,
    pub regularity_score: i32,
    pub volume_score: i32,
    pub savings_score: i32,
    pub usage_score: i32,
    pub seniority_score: i32,
    pub consecutive_sales_days: i32,
    pub total_sales_amount: String,
    pub total_savings_amount: String,
    pub app_usage_days: i32,
    pub account_age_days: i32,
    pub is_eligible_for_credit: bool,
    pub max_credit_amount: String,
    pub credit_tier: String,
    pub last_calculated_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::score_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScoreHistoryDB {
    pub id: String,
    pub merchant_id: String,
    pub total_score: i32,
    pub credit_tier: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<MerchantScoreDB> for MerchantScore {
    type Error = Error;

    fn try_from(db: MerchantScoreDB) -> Result<Self, Self::Error> {
        Ok(Self {
            credit_tier: CreditTier::from_str(&db.credit_tier)?,
            total_sales_amount: parse_decimal(&db.total_sales_amount, "total_sales_amount")?,
            total_savings_amount: parse_decimal(
                &db.total_savings_amount,
                "total_savings_amount",
            )?,
            max_credit_amount: parse_decimal(&db.max_credit_amount, "max_credit_amount")?,
            merchant_id: db.merchant_id,
            total_score: db.total_score,
            regularity_score: db.regularity_score,
            volume_score: db.volume_score,
            savings_score: db.savings_score,
            usage_score: db.usage_score,
            seniority_score: db.seniority_score,
            consecutive_sales_days: db.consecutive_sales_days,
            app_usage_days: db.app_usage_days,
            account_age_days: db.account_age_days,
            is_eligible_for_credit: db.is_eligible_for_credit,
            last_calculated_at: db.last_calculated_at,
        })
    }
}

impl From<&MerchantScore> for MerchantScoreDB {
    fn from(domain: &MerchantScore) -> Self {
        Self {
            merchant_id: domain.merchant_id.clone(),
            total_score: domain.total_score,
            regularity_score: domain.regularity_score,
            volume_score: domain.volume_score,
            savings_score: domain.savings_score,
            usage_score: domain.usage_score,
            seniority_score: domain.seniority_score,
            consecutive_sales_days: domain.consecutive_sales_days,
            total_sales_amount: domain.total_sales_amount.to_string(),
            total_savings_amount: domain.total_savings_amount.to_string(),
            app_usage_days: domain.app_usage_days,
            account_age_days: domain.account_age_days,
            is_eligible_for_credit: domain.is_eligible_for_credit,
            max_credit_amount: domain.max_credit_amount.to_string(),
            credit_tier: domain.credit_tier.as_str().to_string(),
            last_calculated_at: domain.last_calculated_at,
        }
    }
}

impl TryFrom<ScoreHistoryDB> for ScoreHistoryEntry {
    type Error = Error;

    fn try_from(db: ScoreHistoryDB) -> Result<Self, Self::Error> {
        Ok(Self {
            credit_tier: CreditTier::from_str(&db.credit_tier)?,
            id: db.id,
            merchant_id: db.merchant_id,
            total_score: db.total_score,
            created_at: db.created_at,
        })
    }
}
