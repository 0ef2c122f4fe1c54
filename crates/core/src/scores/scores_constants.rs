use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Lookback window, in days, for regularity and volume.
pub const SCORE_WINDOW_DAYS: i64 = 30;

pub const REGULARITY_MAX: i32 = 30;
pub const VOLUME_MAX: i32 = 20;
pub const SAVINGS_MAX: i32 = 20;
pub const USAGE_MAX: i32 = 15;
pub const SENIORITY_MAX: i32 = 15;

/// 30-day sales volume that earns full volume marks.
pub const VOLUME_FULL_MARKS: Decimal = dec!(1000000);
/// Net savings that earn full savings marks.
pub const SAVINGS_FULL_MARKS: Decimal = dec!(100000);
/// Distinct active days that earn full usage marks.
pub const USAGE_FULL_MARKS_DAYS: i64 = 30;
/// Account age that earns full seniority marks.
pub const SENIORITY_FULL_MARKS_DAYS: i64 = 90;

pub const PLATINUM_THRESHOLD: i32 = 80;
pub const GOLD_THRESHOLD: i32 = 65;
pub const SILVER_THRESHOLD: i32 = 50;
pub const BRONZE_THRESHOLD: i32 = 35;

pub const BRONZE_BASE_CREDIT: Decimal = dec!(50000);
pub const SILVER_BASE_CREDIT: Decimal = dec!(100000);
pub const GOLD_BASE_CREDIT: Decimal = dec!(200000);
pub const PLATINUM_BASE_CREDIT: Decimal = dec!(500000);

/// Sales volume at which the credit multiplier reaches 1.
pub const CREDIT_VOLUME_REFERENCE: Decimal = dec!(500000);
pub const MAX_CREDIT_MULTIPLIER: Decimal = dec!(2);

pub const DEFAULT_SCORE_HISTORY_LIMIT: i64 = 30;
