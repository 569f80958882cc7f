//! Conversion between the stored record and `Portfolio`.

use super::wire::StoredHolding;
use super::{Holding, Portfolio};
use crate::error::SdkError;
use crate::shared::AssetId;
use rust_decimal::Decimal;

impl TryFrom<StoredHolding> for Holding {
    type Error = SdkError;

    fn try_from(source: StoredHolding) -> Result<Self, Self::Error> {
        let asset_id = source
            .coin_id
            .filter(|id| !id.trim().is_empty())
            .map(AssetId::new)
            .ok_or_else(|| SdkError::MalformedData("stored holding without coinId".to_string()))?;
        let quantity = source
            .quantity
            .filter(|q| *q > Decimal::ZERO)
            .ok_or_else(|| {
                SdkError::MalformedData(format!("invalid stored quantity for {}", asset_id))
            })?;
        Ok(Holding { asset_id, quantity })
    }
}

impl From<&Holding> for StoredHolding {
    fn from(h: &Holding) -> Self {
        StoredHolding {
            coin_id: Some(h.asset_id.to_string()),
            quantity: Some(h.quantity),
        }
    }
}

fn decode_entry(entry: serde_json::Value) -> Result<Holding, SdkError> {
    let stored: StoredHolding = serde_json::from_value(entry)?;
    Holding::try_from(stored)
}

/// Decode a stored record entry by entry, dropping the ones that fail.
///
/// A record that is not a JSON array degrades to an empty portfolio.
pub fn decode_record(record: &str) -> Portfolio {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(record) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Unreadable holdings record, starting empty: {}", e);
            return Portfolio::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| match decode_entry(entry) {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::warn!("Dropping stored holding: {}", e);
                None
            }
        })
        .collect()
}

pub fn encode_record(portfolio: &Portfolio) -> Result<String, SdkError> {
    let entries: Vec<StoredHolding> = portfolio
        .holdings()
        .iter()
        .map(StoredHolding::from)
        .collect();
    Ok(serde_json::to_string(&entries)?)
}
