//! High-level client — `MarketboardClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared request defaults and the
//! collaborator-trait implementations the core is written against.

use crate::domain::asset::client::Assets;
use crate::domain::asset::{AssetDetail, AssetFetch};
use crate::domain::price_history::client::PriceHistory;
use crate::domain::price_history::{Series, SeriesFetch};
use crate::domain::quote::client::Markets;
use crate::domain::quote::{MarketFetch, MarketQuery, Quote, QuoteCache, TrendingFetch};
use crate::domain::search::client::Search;
use crate::domain::search::{CoinListFetch, CoinListing};
use crate::error::SdkError;
use crate::http::{CoinGeckoHttp, RetryPolicy};
use crate::network::{
    DEFAULT_API_URL, DEFAULT_MARKET_CACHE_TTL, DEFAULT_PER_PAGE, DEFAULT_VS_CURRENCY,
};
use crate::shared::{AssetId, ChartRange};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::asset::client::Assets as AssetsClient;
pub use crate::domain::price_history::client::PriceHistory as PriceHistoryClient;
pub use crate::domain::quote::client::Markets as MarketsClient;
pub use crate::domain::search::client::Search as SearchClient;

/// The primary entry point for CoinGecko-backed market data.
///
/// Provides nested sub-client accessors for each domain:
/// `client.markets()`, `client.assets()`, etc. Cloning is cheap; clones
/// share the connection pool.
#[derive(Debug, Clone)]
pub struct MarketboardClient {
    pub(crate) http: CoinGeckoHttp,
    vs_currency: String,
    page: u32,
    per_page: u32,
    market_cache_ttl: Duration,
}

impl MarketboardClient {
    pub fn builder() -> MarketboardClientBuilder {
        MarketboardClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn assets(&self) -> Assets<'_> {
        Assets { client: self }
    }

    pub fn price_history(&self) -> PriceHistory<'_> {
        PriceHistory { client: self }
    }

    pub fn search(&self) -> Search<'_> {
        Search { client: self }
    }

    // ── Configuration ────────────────────────────────────────────────────

    /// Lower-case quote currency, e.g. `"usd"`.
    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    /// The ranked-table query this client was configured with.
    pub fn market_query(&self) -> MarketQuery {
        MarketQuery::default()
            .vs_currency(&self.vs_currency)
            .page(self.page)
            .per_page(self.per_page)
    }

    pub fn market_cache_ttl(&self) -> Duration {
        self.market_cache_ttl
    }

    /// A snapshot cache over [`Self::market_query`] with the configured TTL.
    ///
    /// The cache owns a clone of the client; build one per dashboard and share
    /// it rather than calling this per request.
    pub fn quote_cache(&self) -> QuoteCache<MarketboardClient> {
        QuoteCache::new(self.clone(), self.market_query(), self.market_cache_ttl)
    }
}

// ─── Collaborator implementations ────────────────────────────────────────────

impl MarketFetch for MarketboardClient {
    async fn fetch_markets(&self, query: &MarketQuery) -> Result<Vec<Quote>, SdkError> {
        self.markets().fetch(query).await
    }
}

impl TrendingFetch for MarketboardClient {
    async fn fetch_trending(&self) -> Result<Vec<Quote>, SdkError> {
        self.markets().trending().await
    }
}

impl AssetFetch for MarketboardClient {
    async fn fetch_asset(&self, id: &AssetId) -> Result<AssetDetail, SdkError> {
        self.assets().get(id).await
    }
}

impl SeriesFetch for MarketboardClient {
    async fn fetch_series(&self, id: &AssetId, range: ChartRange) -> Result<Series, SdkError> {
        self.price_history().get(id, range).await
    }
}

impl CoinListFetch for MarketboardClient {
    async fn fetch_coin_list(&self) -> Result<Vec<CoinListing>, SdkError> {
        self.search().coin_list().await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MarketboardClientBuilder {
    base_url: String,
    vs_currency: String,
    page: u32,
    per_page: u32,
    market_cache_ttl: Duration,
    retry_policy: RetryPolicy,
    api_key: Option<String>,
}

impl Default for MarketboardClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            market_cache_ttl: DEFAULT_MARKET_CACHE_TTL,
            retry_policy: RetryPolicy::None,
            api_key: None,
        }
    }
}

impl MarketboardClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn vs_currency(mut self, currency: &str) -> Self {
        self.vs_currency = currency.to_lowercase();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn market_cache_ttl(mut self, ttl: Duration) -> Self {
        self.market_cache_ttl = ttl;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Demo-plan API key, sent as `x-cg-demo-api-key`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn build(self) -> Result<MarketboardClient, SdkError> {
        if self.vs_currency.trim().is_empty() {
            return Err(SdkError::Validation("vs_currency is required".to_string()));
        }
        Ok(MarketboardClient {
            http: CoinGeckoHttp::new(&self.base_url, self.api_key, self.retry_policy)?,
            vs_currency: self.vs_currency,
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 250),
            market_cache_ttl: self.market_cache_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = MarketboardClient::builder().build().unwrap();
        assert_eq!(client.vs_currency(), "usd");
        assert_eq!(client.market_query(), MarketQuery::default());
        assert_eq!(client.market_cache_ttl(), Duration::from_secs(60));
        assert_eq!(client.http.base_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_builder_overrides_clamp() {
        let client = MarketboardClient::builder()
            .base_url("http://localhost:9000/api/v3/")
            .vs_currency("EUR")
            .page(0)
            .per_page(1000)
            .market_cache_ttl(Duration::from_secs(5))
            .build()
            .unwrap();
        let query = client.market_query();
        assert_eq!(query.vs_currency, "eur");
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 250);
        assert_eq!(client.http.base_url(), "http://localhost:9000/api/v3");
        assert_eq!(client.quote_cache().ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_builder_rejects_blank_currency() {
        let err = MarketboardClient::builder().vs_currency(" ").build();
        assert!(matches!(err, Err(SdkError::Validation(_))));
    }
}
