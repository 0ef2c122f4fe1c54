//! Scores module - SUTA trust score components, credit policy, and service.

mod calculators;
mod scores_constants;
mod scores_model;
mod scores_service;
mod scores_traits;


pub use calculators::{
    account_age_days, assemble_score, longest_consecutive_run, max_credit_amount,
    regularity_score, savings_score, seniority_score, usage_score, volume_score,
};
pub use scores_constants::*;
pub use scores_model::{ComponentScore, CreditTier, MerchantScore, ScoreHistoryEntry, ScoreInputs};
pub use scores_service::ScoreService;
pub use scores_traits::{ScoreRepositoryTrait, ScoreServiceTrait};
