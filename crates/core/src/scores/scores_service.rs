use chrono::{Duration, NaiveDateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

use super::calculators::assemble_score;
use super::scores_constants::{DEFAULT_SCORE_HISTORY_LIMIT, SCORE_WINDOW_DAYS};
use super::scores_model::{MerchantScore, ScoreHistoryEntry, ScoreInputs};
use super::scores_traits::{ScoreRepositoryTrait, ScoreServiceTrait};
use crate::errors::Result;
use crate::merchants::MerchantRepositoryTrait;
use crate::sales::SalesRepositoryTrait;
use crate::savings::{checked_total, SavingsRepositoryTrait};

/// Computes and persists SUTA scores.
pub struct ScoreService {
    score_repository: Arc<dyn ScoreRepositoryTrait>,
    sales_repository: Arc<dyn SalesRepositoryTrait>,
    savings_repository: Arc<dyn SavingsRepositoryTrait>,
    merchant_repository: Arc<dyn MerchantRepositoryTrait>,
}

impl ScoreService {
    pub fn new(
        score_repository: Arc<dyn ScoreRepositoryTrait>,
        sales_repository: Arc<dyn SalesRepositoryTrait>,
        savings_repository: Arc<dyn SavingsRepositoryTrait>,
        merchant_repository: Arc<dyn MerchantRepositoryTrait>,
    ) -> Self {
        Self {
            score_repository,
            sales_repository,
            savings_repository,
            merchant_repository,
        }
    }

    /// Reads the raw history for every component. The reads are independent;
    /// any store failure aborts the calculation.
    fn gather_inputs(&self, merchant_id: &str, now: NaiveDateTime) -> Result<ScoreInputs> {
        let window_start = now - Duration::days(SCORE_WINDOW_DAYS);

        let window_sales = self
            .sales_repository
            .list_sales_since(merchant_id, window_start)?;
        let window_sales_total = checked_total(
            window_sales.iter().map(|s| s.total_amount),
            "Window sales total",
        )?;
        let window_sale_dates = window_sales.iter().map(|s| s.sale_date()).collect();

        let usage_days = self.sales_repository.list_sale_dates(merchant_id)?.len() as i64;
        let net_savings = self.savings_repository.get_net_savings(merchant_id)?;

        let merchant_created_at = match self.merchant_repository.find_by_id(merchant_id)? {
            Some(merchant) => Some(merchant.created_at),
            None => {
                warn!(
                    "Merchant {} not found while scoring; seniority counts as 0",
                    merchant_id
                );
                None
            }
        };

        Ok(ScoreInputs {
            window_sale_dates,
            window_sales_total,
            net_savings,
            usage_days,
            merchant_created_at,
        })
    }
}

#[async_trait::async_trait]
impl ScoreServiceTrait for ScoreService {
    async fn calculate_score(&self, merchant_id: &str) -> Result<MerchantScore> {
        self.calculate_score_at(merchant_id, Utc::now().naive_utc())
            .await
    }

    async fn calculate_score_at(
        &self,
        merchant_id: &str,
        now: NaiveDateTime,
    ) -> Result<MerchantScore> {
        let inputs = self.gather_inputs(merchant_id, now)?;
        debug!("Score inputs for merchant {}: {:?}", merchant_id, inputs);

        let score = assemble_score(merchant_id, &inputs, now);
        let saved = self.score_repository.save_score(score).await?;

        info!(
            "Calculated SUTA score for merchant {}: {} ({}), max credit {}",
            merchant_id, saved.total_score, saved.credit_tier, saved.max_credit_amount
        );
        Ok(saved)
    }

    fn get_score(&self, merchant_id: &str) -> Result<Option<MerchantScore>> {
        self.score_repository.get_score(merchant_id)
    }

    fn get_score_history(
        &self,
        merchant_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ScoreHistoryEntry>> {
        self.score_repository
            .get_history(merchant_id, limit.unwrap_or(DEFAULT_SCORE_HISTORY_LIMIT))
    }
}
