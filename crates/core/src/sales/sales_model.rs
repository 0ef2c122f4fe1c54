//! Sales domain models, as read by the scoring engine.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// A recorded point-of-sale transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub merchant_id: String,
    pub total_amount: Decimal,
    pub created_at: NaiveDateTime,
}

impl Sale {
    /// Calendar day the sale counts towards.
    pub fn sale_date(&self) -> NaiveDate {
        self.created_at.date()
    }
}

/// Input model for recording a sale. `created_at` defaults to now; a value
/// is given when an offline sale is synced later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub merchant_id: String,
    pub total_amount: Decimal,
    pub created_at: Option<NaiveDateTime>,
}

impl NewSale {
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "merchantId".to_string(),
            )));
        }
        if self.total_amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Sale amount cannot be negative, got {}",
                self.total_amount
            ))));
        }
        Ok(())
    }
}
