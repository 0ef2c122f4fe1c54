/// Source recorded on deposits when the caller gives none.
pub const DEFAULT_DEPOSIT_SOURCE: &str = "manual";

pub const DEFAULT_GOAL_TRANSACTIONS_LIMIT: i64 = 50;

pub const DEFAULT_MERCHANT_TRANSACTIONS_LIMIT: i64 = 100;
