use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use super::sales_model::{NewSale, Sale};
use crate::errors::Result;

/// Trait for sales repository operations
#[async_trait]
pub trait SalesRepositoryTrait: Send + Sync {
    /// Sales with `created_at >= since`, newest first.
    fn list_sales_since(&self, merchant_id: &str, since: NaiveDateTime) -> Result<Vec<Sale>>;
    /// Distinct calendar days with at least one sale, all time, ascending.
    fn list_sale_dates(&self, merchant_id: &str) -> Result<Vec<NaiveDate>>;
    async fn insert_sale(&self, new_sale: NewSale) -> Result<Sale>;
}
