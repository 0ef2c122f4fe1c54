use async_trait::async_trait;

use super::merchants_model::{Merchant, NewMerchant};
use crate::errors::Result;

/// Trait for merchant repository operations
#[async_trait]
pub trait MerchantRepositoryTrait: Send + Sync {
    fn find_by_id(&self, merchant_id: &str) -> Result<Option<Merchant>>;
    async fn insert_merchant(&self, new_merchant: NewMerchant) -> Result<Merchant>;
}
