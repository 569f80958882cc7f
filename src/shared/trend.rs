//! Directional sign of a price change.
//!
//! Every colour decision (sparklines, detail charts, percentage badges,
//! valuation deltas) goes through [`Trend::classify`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a change: non-negative or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    /// Classify a percentage or delta.
    ///
    /// Absent values classify as `Positive` so a missing upstream field does not
    /// flip the colour; that is a display default, not a claim about the value.
    /// Exactly zero is `Positive`.
    pub fn classify(value: Option<Decimal>) -> Self {
        match value {
            Some(v) if v.is_sign_negative() && !v.is_zero() => Trend::Negative,
            _ => Trend::Positive,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Trend::Positive)
    }

    /// Class name used by the view layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
        }
    }
}

impl From<Decimal> for Trend {
    fn from(value: Decimal) -> Self {
        Trend::classify(Some(value))
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_absent_is_positive() {
        assert_eq!(Trend::classify(None), Trend::Positive);
    }

    #[test]
    fn test_zero_is_positive() {
        assert_eq!(Trend::classify(Some(Decimal::ZERO)), Trend::Positive);
        // -0 keeps its sign bit in Decimal.
        assert_eq!(Trend::classify(Some(-Decimal::ZERO)), Trend::Positive);
    }

    #[test]
    fn test_small_negative_is_negative() {
        let v = Decimal::from_str("-0.0001").unwrap();
        assert_eq!(Trend::classify(Some(v)), Trend::Negative);
        assert_eq!(Trend::from(v).as_str(), "negative");
    }

    #[test]
    fn test_positive() {
        assert!(Trend::from(Decimal::from(3)).is_positive());
    }
}
