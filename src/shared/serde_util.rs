//! Custom serde helpers for API wire formats.

/// Deserializes an optional number that may arrive as a JSON number, a numeric
/// string, or `null`.
///
/// Non-numeric strings, other JSON types (booleans, objects, arrays) and
/// non-finite values become `None` instead of failing the whole response. Use
/// with `#[serde(default, deserialize_with = "...")]`.
pub mod lenient_f64 {
    use super::NumOrString;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<NumOrString>::deserialize(deserializer)? {
            Some(NumOrString::Num(n)) => Some(n),
            Some(NumOrString::Str(s)) => s.trim().parse::<f64>().ok(),
            Some(NumOrString::Other(_)) | None => None,
        };
        Ok(value.filter(|v| v.is_finite()))
    }
}

/// Deserializes an optional `Decimal` from a numeric string, a JSON number or
/// `null`.
///
/// Strings are parsed exactly; numbers go through `f64`. Anything else becomes
/// `None`.
pub mod lenient_decimal {
    use super::NumOrString;
    use crate::shared::{decimal_from_f64, parse_decimal};
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<NumOrString>::deserialize(deserializer)? {
            Some(NumOrString::Num(n)) => decimal_from_f64(n),
            Some(NumOrString::Str(s)) => parse_decimal(&s),
            Some(NumOrString::Other(_)) | None => None,
        })
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum NumOrString {
    Num(f64),
    Str(String),
    Other(serde::de::IgnoredAny),
}
