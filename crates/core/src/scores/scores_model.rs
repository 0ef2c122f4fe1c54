//! Score domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::scores_constants::{
    BRONZE_BASE_CREDIT, BRONZE_THRESHOLD, GOLD_BASE_CREDIT, GOLD_THRESHOLD,
    PLATINUM_BASE_CREDIT, PLATINUM_THRESHOLD, SILVER_BASE_CREDIT, SILVER_THRESHOLD,
};
use crate::errors::{Error, Result, ValidationError};

/// Credit tier derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditTier {
    None,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl CreditTier {
    /// Thresholds are evaluated highest first.
    pub fn from_score(total_score: i32) -> Self {
        if total_score >= PLATINUM_THRESHOLD {
            CreditTier::Platinum
        } else if total_score >= GOLD_THRESHOLD {
            CreditTier::Gold
        } else if total_score >= SILVER_THRESHOLD {
            CreditTier::Silver
        } else if total_score >= BRONZE_THRESHOLD {
            CreditTier::Bronze
        } else {
            CreditTier::None
        }
    }

    pub fn base_credit(&self) -> Decimal {
        match self {
            CreditTier::None => Decimal::ZERO,
            CreditTier::Bronze => BRONZE_BASE_CREDIT,
            CreditTier::Silver => SILVER_BASE_CREDIT,
            CreditTier::Gold => GOLD_BASE_CREDIT,
            CreditTier::Platinum => PLATINUM_BASE_CREDIT,
        }
    }

    pub fn is_eligible(&self) -> bool {
        *self != CreditTier::None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreditTier::None => "none",
            CreditTier::Bronze => "bronze",
            CreditTier::Silver => "silver",
            CreditTier::Gold => "gold",
            CreditTier::Platinum => "platinum",
        }
    }
}

impl fmt::Display for CreditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreditTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(CreditTier::None),
            "bronze" => Ok(CreditTier::Bronze),
            "silver" => Ok(CreditTier::Silver),
            "gold" => Ok(CreditTier::Gold),
            "platinum" => Ok(CreditTier::Platinum),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown credit tier '{}'",
                other
            )))),
        }
    }
}

/// One clamped sub-score and the raw metric it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScore<M> {
    pub score: i32,
    pub metric: M,
}

/// Raw history figures the five calculators consume.
#[derive(Debug, Clone, Default)]
pub struct ScoreInputs {
    /// Calendar days with a sale inside the lookback window, any order.
    pub window_sale_dates: Vec<chrono::NaiveDate>,
    pub window_sales_total: Decimal,
    pub net_savings: Decimal,
    /// Distinct calendar days with a sale, all time.
    pub usage_days: i64,
    pub merchant_created_at: Option<NaiveDateTime>,
}

/// Current score snapshot for a merchant; one per merchant, overwritten on
/// every recalculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MerchantScore {
    pub merchant_id: String,
    pub total_score: i32,
    pub regularity_score: i32,
    pub volume_score: i32,
    pub savings_score: i32,
    pub usage_score: i32,
    pub seniority_score: i32,
    pub consecutive_sales_days: i32,
    pub total_sales_amount: Decimal,
    pub total_savings_amount: Decimal,
    pub app_usage_days: i32,
    pub account_age_days: i32,
    pub is_eligible_for_credit: bool,
    pub max_credit_amount: Decimal,
    pub credit_tier: CreditTier,
    pub last_calculated_at: NaiveDateTime,
}

/// Append-only record of a past calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistoryEntry {
    pub id: String,
    pub merchant_id: String,
    pub total_score: i32,
    pub credit_tier: CreditTier,
    pub created_at: NaiveDateTime,
}
