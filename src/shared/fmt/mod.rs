//! Human-readable formatting for prices, percentages and large amounts.
//!
//! All entry points take `Option<Decimal>`: a missing value renders as the
//! zero form (`$0.00`, `0.00%`, `0`) instead of failing. Text input goes through
//! [`crate::shared::parse_decimal`] first.

pub mod decimal;
pub mod num;

pub use decimal::{
    abbr_number, format_compact_currency, format_currency, format_large_number,
    format_percentage,
};
