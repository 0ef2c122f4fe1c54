//! The five SUTA score components and the credit policy built on them.
//!
//! Every function here is pure: the service gathers raw history figures from
//! the repositories and passes them in, so the scoring rules can be tested
//! without a database.

use chrono::{NaiveDate, NaiveDateTime};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::scores_constants::{
    CREDIT_VOLUME_REFERENCE, MAX_CREDIT_MULTIPLIER, REGULARITY_MAX, SAVINGS_FULL_MARKS,
    SAVINGS_MAX, SENIORITY_FULL_MARKS_DAYS, SENIORITY_MAX, USAGE_FULL_MARKS_DAYS, USAGE_MAX,
    VOLUME_FULL_MARKS, VOLUME_MAX,
};
use super::scores_model::{ComponentScore, CreditTier, MerchantScore, ScoreInputs};

/// `clamp(floor(value / full_marks * max), 0, max)`.
fn scaled_score(value: Decimal, full_marks: Decimal, max: i32) -> i32 {
    if value <= Decimal::ZERO {
        return 0;
    }
    if value >= full_marks {
        return max;
    }
    (value * Decimal::from(max) / full_marks)
        .floor()
        .to_i32()
        .unwrap_or(0)
        .clamp(0, max)
}

/// Same as `scaled_score` over whole days.
fn scaled_days(days: i64, full_marks_days: i64, max: i32) -> i32 {
    if days <= 0 {
        return 0;
    }
    let scaled = days.saturating_mul(i64::from(max)) / full_marks_days;
    scaled.min(i64::from(max)) as i32
}

fn to_days_i32(days: i64) -> i32 {
    i32::try_from(days.max(0)).unwrap_or(i32::MAX)
}

/// Longest run of consecutive calendar days with a sale.
pub fn longest_consecutive_run(dates: &[NaiveDate]) -> i32 {
    let mut days: Vec<NaiveDate> = dates.to_vec();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    if days.is_empty() {
        return 0;
    }

    let mut longest = 1;
    let mut current = 1;
    for pair in days.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }
    longest
}

/// Regularity (max 30): longest streak of selling days in the window.
pub fn regularity_score(window_sale_dates: &[NaiveDate]) -> ComponentScore<i32> {
    let consecutive_days = longest_consecutive_run(window_sale_dates);
    ComponentScore {
        score: consecutive_days.min(REGULARITY_MAX),
        metric: consecutive_days,
    }
}

/// Volume (max 20): 1,000,000 of 30-day sales earns full marks.
pub fn volume_score(window_sales_total: Decimal) -> ComponentScore<Decimal> {
    ComponentScore {
        score: scaled_score(window_sales_total, VOLUME_FULL_MARKS, VOLUME_MAX),
        metric: window_sales_total,
    }
}

/// Savings (max 20): 100,000 of net savings earns full marks. A negative net
/// scores 0.
pub fn savings_score(net_savings: Decimal) -> ComponentScore<Decimal> {
    ComponentScore {
        score: scaled_score(net_savings, SAVINGS_FULL_MARKS, SAVINGS_MAX),
        metric: net_savings,
    }
}

/// Usage (max 15): 30 distinct selling days earn full marks.
pub fn usage_score(usage_days: i64) -> ComponentScore<i32> {
    ComponentScore {
        score: scaled_days(usage_days, USAGE_FULL_MARKS_DAYS, USAGE_MAX),
        metric: to_days_i32(usage_days),
    }
}

/// Whole days between account creation and `now`; 0 for unknown accounts
/// and creation dates in the future.
pub fn account_age_days(created_at: Option<NaiveDateTime>, now: NaiveDateTime) -> i64 {
    created_at
        .map(|created| (now - created).num_days().max(0))
        .unwrap_or(0)
}

/// Seniority (max 15): 90 days of account age earn full marks.
pub fn seniority_score(
    created_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> ComponentScore<i32> {
    let age = account_age_days(created_at, now);
    ComponentScore {
        score: scaled_days(age, SENIORITY_FULL_MARKS_DAYS, SENIORITY_MAX),
        metric: to_days_i32(age),
    }
}

/// `floor(base(tier) * min(2, sales / 500,000))`.
pub fn max_credit_amount(tier: CreditTier, total_sales_amount: Decimal) -> Decimal {
    let base = tier.base_credit();
    if base.is_zero() {
        return Decimal::ZERO;
    }
    let multiplier = (total_sales_amount / CREDIT_VOLUME_REFERENCE)
        .min(MAX_CREDIT_MULTIPLIER)
        .max(Decimal::ZERO);
    (base * multiplier).floor()
}

/// Combines the five components into a snapshot.
pub fn assemble_score(merchant_id: &str, inputs: &ScoreInputs, now: NaiveDateTime) -> MerchantScore {
    let regularity = regularity_score(&inputs.window_sale_dates);
    let volume = volume_score(inputs.window_sales_total);
    let savings = savings_score(inputs.net_savings);
    let usage = usage_score(inputs.usage_days);
    let seniority = seniority_score(inputs.merchant_created_at, now);

    let total_score =
        regularity.score + volume.score + savings.score + usage.score + seniority.score;
    let credit_tier = CreditTier::from_score(total_score);

    MerchantScore {
        merchant_id: merchant_id.to_string(),
        total_score,
        regularity_score: regularity.score,
        volume_score: volume.score,
        savings_score: savings.score,
        usage_score: usage.score,
        seniority_score: seniority.score,
        consecutive_sales_days: regularity.metric,
        total_sales_amount: volume.metric,
        total_savings_amount: savings.metric,
        app_usage_days: usage.metric,
        account_age_days: seniority.metric,
        is_eligible_for_credit: credit_tier.is_eligible(),
        max_credit_amount: max_credit_amount(credit_tier, volume.metric),
        credit_tier,
        last_calculated_at: now,
    }
}
