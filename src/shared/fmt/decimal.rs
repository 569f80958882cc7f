//! `Decimal` formatting for the dashboard's price, change and volume cells.

use super::num::{display_formatted_string, group_thousands};
use rust_decimal::prelude::*;
use std::sync::OnceLock;

static CENT: OnceLock<Decimal> = OnceLock::new();
static TRILLION: OnceLock<Decimal> = OnceLock::new();
static BILLION: OnceLock<Decimal> = OnceLock::new();
static MILLION: OnceLock<Decimal> = OnceLock::new();
static THOUSAND: OnceLock<Decimal> = OnceLock::new();

fn get_cent() -> &'static Decimal {
    CENT.get_or_init(|| Decimal::new(1, 2))
}

fn get_trillion() -> &'static Decimal {
    TRILLION.get_or_init(|| Decimal::from(1_000_000_000_000u64))
}

fn get_billion() -> &'static Decimal {
    BILLION.get_or_init(|| Decimal::from(1_000_000_000u64))
}

fn get_million() -> &'static Decimal {
    MILLION.get_or_init(|| Decimal::from(1_000_000u64))
}

fn get_thousand() -> &'static Decimal {
    THOUSAND.get_or_init(|| Decimal::from(1_000u64))
}

fn fixed(value: &Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1$}", rounded, dp as usize)
}

/// US-dollar price: `$1,234.56`.
///
/// Magnitudes below one cent (other than zero) get 8 decimals so sub-cent
/// tokens stay readable: `$0.00001234`.
pub fn format_currency(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return "$0.00".to_string();
    };

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = value.abs();

    if !abs.is_zero() && abs < *get_cent() {
        return format!("{}${}", sign, fixed(&abs, 8));
    }

    let body = fixed(&abs, 2);
    // Rounding can turn e.g. -0.001 into 0.00; do not print "-$0.00".
    let sign = if body == "0.00" { "" } else { sign };
    format!("{}${}", sign, group_thousands(&body))
}

/// Signed percentage with two decimals: `+1.23%`, `-0.50%`. Missing is `0.00%`.
pub fn format_percentage(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return "0.00%".to_string();
    };
    let body = fixed(&value, 2);
    if body.starts_with('-') {
        format!("{}%", body)
    } else {
        format!("+{}%", body)
    }
}

/// Large amounts with K/M/B/T suffixes: `1.23B`; below a thousand the plain
/// value with separators and at most 3 decimals.
pub fn format_large_number(value: Option<Decimal>) -> String {
    let value = value.unwrap_or(Decimal::ZERO);
    if value.abs() >= *get_thousand() {
        return abbr_number(&value, Some(2), Some(true));
    }
    display_formatted_string(value.round_dp(3).to_string())
}

/// Market cap / volume cells: [`format_large_number`] with a dollar prefix.
pub fn format_compact_currency(value: Option<Decimal>) -> String {
    let formatted = format_large_number(value);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", formatted),
    }
}

/// Abbreviate a `Decimal` with K/M/B/T suffixes.
pub fn abbr_number(amount: &Decimal, digits: Option<usize>, show_sign: Option<bool>) -> String {
    let digits = digits.unwrap_or(2) as u32;
    let show_sign = show_sign.unwrap_or(true);
    let sign = if show_sign && amount < &Decimal::ZERO {
        "-"
    } else {
        ""
    };
    let abs_amount = amount.abs();

    let (scaled, suffix) = if abs_amount >= *get_trillion() {
        (abs_amount / get_trillion(), "T")
    } else if abs_amount >= *get_billion() {
        (abs_amount / get_billion(), "B")
    } else if abs_amount >= *get_million() {
        (abs_amount / get_million(), "M")
    } else if abs_amount >= *get_thousand() {
        (abs_amount / get_thousand(), "K")
    } else {
        (abs_amount, "")
    };

    format!("{}{}{}", sign, fixed(&scaled, digits), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_currency_missing_is_zero() {
        assert_eq!(format_currency(None), "$0.00");
        assert_eq!(format_currency(Some(Decimal::ZERO)), "$0.00");
    }

    #[test]
    fn test_format_currency_regular() {
        assert_eq!(format_currency(Some(dec("1234.5"))), "$1,234.50");
        assert_eq!(format_currency(Some(dec("65432.129"))), "$65,432.13");
        assert_eq!(format_currency(Some(dec("0.01"))), "$0.01");
        assert_eq!(format_currency(Some(dec("-1234.5"))), "-$1,234.50");
    }

    #[test]
    fn test_format_currency_sub_cent() {
        assert_eq!(format_currency(Some(dec("0.00001234"))), "$0.00001234");
        assert_eq!(format_currency(Some(dec("0.005"))), "$0.00500000");
        assert_eq!(format_currency(Some(dec("-0.005"))), "-$0.00500000");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(None), "0.00%");
        assert_eq!(format_percentage(Some(dec("1.234"))), "+1.23%");
        assert_eq!(format_percentage(Some(dec("-0.5"))), "-0.50%");
        assert_eq!(format_percentage(Some(Decimal::ZERO)), "+0.00%");
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(None), "0");
        assert_eq!(format_large_number(Some(dec("999"))), "999");
        assert_eq!(format_large_number(Some(dec("12.3456"))), "12.346");
        assert_eq!(format_large_number(Some(dec("1500"))), "1.50K");
        assert_eq!(format_large_number(Some(dec("2500000"))), "2.50M");
        assert_eq!(format_large_number(Some(dec("1230000000"))), "1.23B");
        assert_eq!(format_large_number(Some(dec("1300000000000"))), "1.30T");
    }

    #[test]
    fn test_format_compact_currency() {
        assert_eq!(format_compact_currency(Some(dec("1230000000"))), "$1.23B");
        assert_eq!(format_compact_currency(Some(dec("-2500000"))), "-$2.50M");
        assert_eq!(format_compact_currency(None), "$0");
    }

    #[test]
    fn test_abbr_number() {
        assert_eq!(abbr_number(&dec("0"), None, None), "0.00");
        assert_eq!(abbr_number(&dec("1500"), None, None), "1.50K");
        assert_eq!(abbr_number(&dec("-1500000"), None, None), "-1.50M");
        assert_eq!(abbr_number(&dec("-1500000"), None, Some(false)), "1.50M");
    }
}
