//! Wire types for `/coins/markets` responses (REST).

use crate::shared::serde_util::lenient_f64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Embedded 7-day price series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparklineResponse {
    #[serde(default)]
    pub price: Vec<Option<f64>>,
}

/// One element of the `/coins/markets` array.
///
/// Numbers stay `f64` here; conversion to `Decimal` happens in `convert.rs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketCoinResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub market_cap_rank: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub total_volume: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub high_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub low_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_change_percentage_24h_in_currency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_change_percentage_30d_in_currency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub circulating_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub max_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub ath: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub atl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparkline_in_7d: Option<SparklineResponse>,
}
