//! Low-level HTTP client — `CoinGeckoHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). Internal to the crate — `MarketboardClient`
//! wraps this.

use crate::domain::asset::wire::CoinDetailResponse;
use crate::domain::price_history::wire::MarketChartResponse;
use crate::domain::quote::wire::MarketCoinResponse;
use crate::domain::quote::MarketQuery;
use crate::domain::search::wire::{CoinListEntryResponse, SearchResponse, TrendingResponse};
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;
use crate::shared::{AssetId, ChartRange};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Header carrying a CoinGecko demo-plan key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Low-level HTTP client for the CoinGecko v3 REST API.
#[derive(Clone)]
pub struct CoinGeckoHttp {
    base_url: String,
    client: Client,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl std::fmt::Debug for CoinGeckoHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinGeckoHttp")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("retry", &self.retry)
            .finish()
    }
}

impl CoinGeckoHttp {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        retry: RetryPolicy,
    ) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Markets ──────────────────────────────────────────────────────────

    pub async fn get_markets(
        &self,
        query: &MarketQuery,
    ) -> Result<Vec<MarketCoinResponse>, HttpError> {
        let url = markets_url(&self.base_url, query);
        self.get(&url).await
    }

    // ── Coins ────────────────────────────────────────────────────────────

    pub async fn get_coin(&self, id: &AssetId) -> Result<CoinDetailResponse, HttpError> {
        let url = format!(
            "{}/coins/{}?localization=false&tickers=false&market_data=true\
             &community_data=false&developer_data=false&sparkline=false",
            self.base_url,
            urlencoding::encode(id.as_str())
        );
        self.get(&url).await
    }

    pub async fn get_market_chart(
        &self,
        id: &AssetId,
        vs_currency: &str,
        range: ChartRange,
    ) -> Result<MarketChartResponse, HttpError> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}&interval={}",
            self.base_url,
            urlencoding::encode(id.as_str()),
            urlencoding::encode(vs_currency),
            range.days(),
            range.interval()
        );
        self.get(&url).await
    }

    pub async fn get_coin_list(&self) -> Result<Vec<CoinListEntryResponse>, HttpError> {
        let url = format!("{}/coins/list?include_platform=false", self.base_url);
        self.get(&url).await
    }

    // ── Search ───────────────────────────────────────────────────────────

    pub async fn get_trending(&self) -> Result<TrendingResponse, HttpError> {
        let url = format!("{}/search/trending", self.base_url);
        self.get(&url).await
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse, HttpError> {
        let url = format!(
            "{}/search?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let Some(config) = self.retry.config() else {
            return self.do_get(url).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            let err = match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            let delay = match &err {
                HttpError::ServerError { status, .. }
                    if config.retryable_statuses.contains(status) =>
                {
                    Some(config.delay_for_attempt(attempt))
                }
                HttpError::RateLimited { retry_after_ms }
                    if config.retryable_statuses.contains(&429) =>
                {
                    config.delay_for_rate_limit(attempt, *retry_after_ms)
                }
                HttpError::Timeout => Some(config.delay_for_attempt(attempt)),
                HttpError::Reqwest(re) => {
                    #[cfg(not(target_arch = "wasm32"))]
                    let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                    #[cfg(target_arch = "wasm32")]
                    let retryable = re.is_timeout() || re.is_request();
                    retryable.then(|| config.delay_for_attempt(attempt))
                }
                _ => None,
            };

            match delay {
                Some(delay) if attempt < config.max_retries => {
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying request to {}",
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    last_error = Some(err);
                }
                _ => return Err(err),
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let mut req = self.client.get(url).header("accept", "application/json");
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body_text = resp.text().await.unwrap_or_default();

        Err(status_error(status_code, body_text, retry_after_ms))
    }
}

/// `/coins/markets` URL for a query. Ranked by market cap, with the
/// 24h/7d/30d change columns the table sorts on.
pub(crate) fn markets_url(base_url: &str, query: &MarketQuery) -> String {
    let mut url = format!(
        "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page={}\
         &sparkline={}&price_change_percentage=24h,7d,30d",
        base_url,
        urlencoding::encode(&query.vs_currency),
        query.per_page,
        query.page,
        query.sparkline
    );
    if !query.ids.is_empty() {
        let ids: Vec<&str> = query.ids.iter().map(AssetId::as_str).collect();
        url = format!("{}&ids={}", url, urlencoding::encode(&ids.join(",")));
    }
    url
}

/// Map a non-success status to the error taxonomy.
pub(crate) fn status_error(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        404 => HttpError::NotFound(body),
        408 => HttpError::Timeout,
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}

/// `Retry-After` in delta-seconds. HTTP-date values are ignored.
fn parse_retry_after(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().map(|s| s.saturating_mul(1000))
}
