//! Wire types for `/coins/{id}` (REST).

use crate::shared::serde_util::lenient_f64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A per-currency figure. The API sends a `{ "usd": 1.0, … }` map; a bare
/// number is accepted as the value for any currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrencyAmount {
    PerCurrency(HashMap<String, Option<f64>>),
    Flat(f64),
}

impl CurrencyAmount {
    pub fn get(&self, currency: &str) -> Option<f64> {
        let value = match self {
            CurrencyAmount::PerCurrency(map) => map.get(currency).copied().flatten(),
            CurrencyAmount::Flat(v) => Some(*v),
        };
        value.filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketDataResponse {
    #[serde(default)]
    pub current_price: Option<CurrencyAmount>,
    #[serde(default)]
    pub market_cap: Option<CurrencyAmount>,
    #[serde(default)]
    pub total_volume: Option<CurrencyAmount>,
    #[serde(default)]
    pub high_24h: Option<CurrencyAmount>,
    #[serde(default)]
    pub low_24h: Option<CurrencyAmount>,
    #[serde(default)]
    pub ath: Option<CurrencyAmount>,
    #[serde(default)]
    pub atl: Option<CurrencyAmount>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_change_percentage_7d: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price_change_percentage_30d: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: Option<CurrencyAmount>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<CurrencyAmount>,
    #[serde(default)]
    pub price_change_percentage_30d_in_currency: Option<CurrencyAmount>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub circulating_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub total_supply: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub max_supply: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinksResponse {
    #[serde(default)]
    pub homepage: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Single-coin response with `market_data=true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinDetailResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Localized descriptions keyed by language code.
    #[serde(default)]
    pub description: Option<HashMap<String, Option<String>>>,
    #[serde(default)]
    pub links: Option<LinksResponse>,
    #[serde(default)]
    pub image: Option<ImageResponse>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub market_cap_rank: Option<f64>,
    #[serde(default)]
    pub market_data: Option<MarketDataResponse>,
}
