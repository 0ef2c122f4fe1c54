//! Merchant domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Account metadata the seniority score is derived from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: String,
    pub business_name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMerchant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub business_name: String,
    pub created_at: Option<NaiveDateTime>,
}

impl NewMerchant {
    pub fn validate(&self) -> Result<()> {
        if self.business_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Business name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
