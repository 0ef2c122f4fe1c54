//! Helpers for decimal columns stored as TEXT.

use rust_decimal::Decimal;
use std::str::FromStr;
use suta_core::Result;

/// Parses a TEXT decimal column.
///
/// Values written by this crate are canonical decimal strings. Scientific
/// renderings such as `1e5` are read exactly. Anything else is an error: a
/// ledger balance is never replaced with a default.
pub fn parse_decimal(value: &str, field_name: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .or_else(|e| Decimal::from_scientific(value).map_err(|_| e))
        .map_err(|e| {
            log::error!("Failed to parse {} '{}' as Decimal: {}", field_name, value, e);
            e.into()
        })
}
