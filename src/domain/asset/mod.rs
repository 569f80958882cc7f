//! Asset domain — single-coin detail for the drill-down view.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::error::SdkError;
use crate::shared::{AssetId, Trend};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;

pub use convert::asset_from_wire;

/// Market figures of one asset in a single quote currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub current_price: Decimal,
    pub market_cap: Option<Decimal>,
    pub total_volume: Option<Decimal>,
    pub high_24h: Option<Decimal>,
    pub low_24h: Option<Decimal>,
    pub price_change_percentage_24h: Option<Decimal>,
    pub price_change_percentage_7d: Option<Decimal>,
    pub price_change_percentage_30d: Option<Decimal>,
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub max_supply: Option<Decimal>,
    pub ath: Option<Decimal>,
    pub atl: Option<Decimal>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Full detail of one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetail {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub image: Option<String>,
    pub market_cap_rank: Option<u32>,
    /// Currency the `market_data` figures are denominated in.
    pub vs_currency: String,
    pub market_data: MarketData,
}

impl AssetDetail {
    /// `"Ethereum (ETH)"`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }

    /// Badge colours for the 24h / 7d / 30d changes.
    pub fn trends(&self) -> [Trend; 3] {
        let md = &self.market_data;
        [
            Trend::classify(md.price_change_percentage_24h),
            Trend::classify(md.price_change_percentage_7d),
            Trend::classify(md.price_change_percentage_30d),
        ]
    }
}

/// Source of single-asset detail. A missing asset is `HttpError::NotFound`.
pub trait AssetFetch {
    fn fetch_asset(&self, id: &AssetId) -> impl Future<Output = Result<AssetDetail, SdkError>>;
}

impl<T: AssetFetch + ?Sized> AssetFetch for &T {
    fn fetch_asset(&self, id: &AssetId) -> impl Future<Output = Result<AssetDetail, SdkError>> {
        (**self).fetch_asset(id)
    }
}

impl<T: AssetFetch + ?Sized> AssetFetch for std::sync::Arc<T> {
    fn fetch_asset(&self, id: &AssetId) -> impl Future<Output = Result<AssetDetail, SdkError>> {
        (**self).fetch_asset(id)
    }
}
