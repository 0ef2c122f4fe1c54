use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::scores_model::{MerchantScore, ScoreHistoryEntry};
use crate::errors::Result;

/// Trait for score repository operations
#[async_trait]
pub trait ScoreRepositoryTrait: Send + Sync {
    fn get_score(&self, merchant_id: &str) -> Result<Option<MerchantScore>>;
    /// Newest first.
    fn get_history(&self, merchant_id: &str, limit: i64) -> Result<Vec<ScoreHistoryEntry>>;
    /// Upserts the snapshot keyed by merchant and appends one history entry,
    /// atomically.
    async fn save_score(&self, score: MerchantScore) -> Result<MerchantScore>;
}

/// Trait for score service operations
#[async_trait]
pub trait ScoreServiceTrait: Send + Sync {
    async fn calculate_score(&self, merchant_id: &str) -> Result<MerchantScore>;
    async fn calculate_score_at(
        &self,
        merchant_id: &str,
        now: NaiveDateTime,
    ) -> Result<MerchantScore>;
    fn get_score(&self, merchant_id: &str) -> Result<Option<MerchantScore>>;
    fn get_score_history(
        &self,
        merchant_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ScoreHistoryEntry>>;
}
