//! Quote domain — market snapshot rows, snapshot cache, table filtering/sorting.

pub mod cache;
#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod view;
pub mod wire;

use crate::error::SdkError;
use crate::network::{DEFAULT_PER_PAGE, DEFAULT_VS_CURRENCY};
use crate::shared::{AssetId, Trend};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;

pub use cache::QuoteCache;
pub use convert::quotes_from_wire;
pub use view::{MarketView, SortDirection, SortKey, SortState};

// ─── Quote ───────────────────────────────────────────────────────────────────

/// One row of the market table: latest price plus change and supply figures.
///
/// Optional figures stay `None` when the upstream sends null or garbage; the
/// sort and aggregation code treats them as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Decimal,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_24h: Option<Decimal>,
    pub price_change_percentage_7d: Option<Decimal>,
    pub price_change_percentage_30d: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub total_volume: Option<Decimal>,
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub max_supply: Option<Decimal>,
    pub ath: Option<Decimal>,
    pub atl: Option<Decimal>,
    pub high_24h: Option<Decimal>,
    pub low_24h: Option<Decimal>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Last 7 days of prices, oldest first. Empty when not requested.
    pub sparkline: Vec<Decimal>,
}

impl Quote {
    /// Colour of the 24h change badge.
    pub fn trend_24h(&self) -> Trend {
        Trend::classify(self.price_change_percentage_24h)
    }

    /// Colour of the 7-day sparkline.
    pub fn trend_7d(&self) -> Trend {
        Trend::classify(self.price_change_percentage_7d)
    }

    /// Upper-cased ticker for display.
    pub fn ticker(&self) -> String {
        self.symbol.to_uppercase()
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// The market table as fetched at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub quotes: Vec<Quote>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            fetched_at: Utc::now(),
        }
    }

    pub fn get(&self, id: &AssetId) -> Option<&Quote> {
        self.quotes.iter().find(|q| &q.id == id)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

// ─── MarketQuery ─────────────────────────────────────────────────────────────

/// Parameters of a `/coins/markets` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    pub vs_currency: String,
    pub page: u32,
    pub per_page: u32,
    /// Restrict to these assets. Empty means the whole ranked list.
    pub ids: Vec<AssetId>,
    pub sparkline: bool,
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self {
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            ids: Vec::new(),
            sparkline: true,
        }
    }
}

impl MarketQuery {
    /// Query for a fixed set of assets (portfolio, trending).
    pub fn for_ids(ids: impl IntoIterator<Item = AssetId>) -> Self {
        let ids: Vec<AssetId> = ids.into_iter().collect();
        Self {
            per_page: (ids.len() as u32).clamp(1, 250),
            ids,
            ..Self::default()
        }
    }

    pub fn vs_currency(mut self, currency: &str) -> Self {
        self.vs_currency = currency.to_lowercase();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, 250);
        self
    }

    pub fn sparkline(mut self, sparkline: bool) -> Self {
        self.sparkline = sparkline;
        self
    }
}

// ─── Collaborator ────────────────────────────────────────────────────────────

/// Source of market quotes. `MarketboardClient` implements this over HTTP;
/// tests and offline hosts plug in their own.
pub trait MarketFetch {
    fn fetch_markets(
        &self,
        query: &MarketQuery,
    ) -> impl Future<Output = Result<Vec<Quote>, SdkError>>;
}

impl<T: MarketFetch + ?Sized> MarketFetch for &T {
    fn fetch_markets(
        &self,
        query: &MarketQuery,
    ) -> impl Future<Output = Result<Vec<Quote>, SdkError>> {
        (**self).fetch_markets(query)
    }
}

impl<T: MarketFetch + ?Sized> MarketFetch for std::sync::Arc<T> {
    fn fetch_markets(
        &self,
        query: &MarketQuery,
    ) -> impl Future<Output = Result<Vec<Quote>, SdkError>> {
        (**self).fetch_markets(query)
    }
}

/// Source of quotes for the currently trending coins.
pub trait TrendingFetch {
    fn fetch_trending(&self) -> impl Future<Output = Result<Vec<Quote>, SdkError>>;
}

impl<T: TrendingFetch + ?Sized> TrendingFetch for &T {
    fn fetch_trending(&self) -> impl Future<Output = Result<Vec<Quote>, SdkError>> {
        (**self).fetch_trending()
    }
}

impl<T: TrendingFetch + ?Sized> TrendingFetch for std::sync::Arc<T> {
    fn fetch_trending(&self) -> impl Future<Output = Result<Vec<Quote>, SdkError>> {
        (**self).fetch_trending()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_query_defaults() {
        let q = MarketQuery::default();
        assert_eq!(q.vs_currency, "usd");
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 100);
        assert!(q.sparkline);
        assert!(q.ids.is_empty());
    }

    #[test]
    fn test_market_query_for_ids_sizes_page() {
        let q = MarketQuery::for_ids(vec![AssetId::from("bitcoin"), AssetId::from("ethereum")]);
        assert_eq!(q.per_page, 2);
        assert_eq!(q.ids.len(), 2);
        assert_eq!(MarketQuery::for_ids(Vec::new()).per_page, 1);
    }

    #[test]
    fn test_snapshot_lookup() {
        let snap = Snapshot::new(vec![test_support::quote("bitcoin", 100, Some(-2))]);
        assert_eq!(snap.len(), 1);
        let btc = snap.get(&AssetId::from("bitcoin")).unwrap();
        assert_eq!(btc.trend_24h(), Trend::Negative);
        assert_eq!(btc.ticker(), "BIT");
        assert!(snap.get(&AssetId::from("ethereum")).is_none());
    }
}
