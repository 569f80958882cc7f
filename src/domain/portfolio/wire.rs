//! Stored holdings record: a JSON array of `{ "coinId": …, "quantity": … }`.

use crate::shared::serde_util::lenient_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredHolding {
    #[serde(rename = "coinId", default)]
    pub coin_id: Option<String>,
    /// Written as exact decimal text; plain JSON numbers are accepted on read.
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub quantity: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_holding_shape() {
        let h = StoredHolding {
            coin_id: Some("bitcoin".into()),
            quantity: Some(Decimal::new(5, 1)),
        };
        assert_eq!(
            serde_json::to_string(&h).unwrap(),
            r#"{"coinId":"bitcoin","quantity":"0.5"}"#
        );
        let back: StoredHolding = serde_json::from_str(r#"{"coinId":"eth","quantity":2}"#).unwrap();
        assert_eq!(back.quantity, Some(Decimal::from(2)));
    }
}
