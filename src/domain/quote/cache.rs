//! Market snapshot cache — one slot, TTL freshness, single in-flight fetch.
//!
//! The slot is an `async_lock::RwLock` holding `Arc<Snapshot>`, swapped
//! wholesale on every successful fetch so readers never see a half-updated
//! table. Fetches are serialized by an `async_lock::Mutex`; a caller that queued
//! behind another caller's fetch gets that fetch's outcome instead of issuing
//! its own request.

use super::{MarketFetch, MarketQuery, Snapshot};
use crate::error::SdkError;
use crate::network::DEFAULT_MARKET_CACHE_TTL;
use async_lock::{Mutex, RwLock};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of the most recent completed fetch, shared with queued callers.
#[derive(Debug, Clone)]
enum LastFetch {
    Succeeded(Arc<Snapshot>),
    Failed(String),
}

/// TTL cache over the market snapshot.
pub struct QuoteCache<F> {
    fetcher: F,
    query: MarketQuery,
    ttl: Duration,
    slot: RwLock<Option<Arc<Snapshot>>>,
    in_flight: Mutex<Option<LastFetch>>,
    /// Completed fetches (success or failure). Read before queueing on
    /// `in_flight` to detect that someone else fetched meanwhile.
    completed: AtomicU64,
}

impl<F: MarketFetch> QuoteCache<F> {
    pub fn new(fetcher: F, query: MarketQuery, ttl: Duration) -> Self {
        Self {
            fetcher,
            query,
            ttl,
            slot: RwLock::new(None),
            in_flight: Mutex::new(None),
            completed: AtomicU64::new(0),
        }
    }

    /// Default query (first 100 by market cap, sparklines on) and a 60 s TTL.
    pub fn with_defaults(fetcher: F) -> Self {
        Self::new(fetcher, MarketQuery::default(), DEFAULT_MARKET_CACHE_TTL)
    }

    /// Return the cached snapshot if fresh, otherwise fetch.
    ///
    /// `force_refresh` skips the freshness check. On failure the previous
    /// snapshot stays in place and remains readable through [`Self::peek`].
    pub async fn get(&self, force_refresh: bool) -> Result<Arc<Snapshot>, SdkError> {
        if !force_refresh {
            if let Some(snapshot) = self.fresh().await {
                tracing::debug!(quotes = snapshot.len(), "Market cache hit");
                return Ok(snapshot);
            }
        }

        let observed = self.completed.load(Ordering::Acquire);
        let mut last = self.in_flight.lock().await;

        if self.completed.load(Ordering::Acquire) != observed {
            if let Some(outcome) = last.as_ref() {
                tracing::debug!("Joining market fetch completed while queued");
                return match outcome {
                    LastFetch::Succeeded(snapshot) => Ok(snapshot.clone()),
                    LastFetch::Failed(message) => Err(SdkError::RefreshFailed(message.clone())),
                };
            }
        }

        tracing::debug!(force_refresh, "Market cache miss, fetching");
        let result = self.fetcher.fetch_markets(&self.query).await;

        let outcome = match result {
            Ok(quotes) => {
                let snapshot = Arc::new(Snapshot::new(quotes));
                *self.slot.write().await = Some(snapshot.clone());
                *last = Some(LastFetch::Succeeded(snapshot.clone()));
                Ok(snapshot)
            }
            Err(e) => {
                tracing::warn!("Market refresh failed, keeping previous snapshot: {}", e);
                *last = Some(LastFetch::Failed(e.to_string()));
                Err(e)
            }
        };
        self.completed.fetch_add(1, Ordering::AcqRel);
        outcome
    }

    /// Last successful snapshot regardless of age.
    pub async fn peek(&self) -> Option<Arc<Snapshot>> {
        self.slot.read().await.clone()
    }

    /// Drop the cached snapshot; the next `get` fetches.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    /// `true` if a snapshot exists and is younger than the TTL.
    pub async fn is_fresh(&self) -> bool {
        self.fresh().await.is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn query(&self) -> &MarketQuery {
        &self.query
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    async fn fresh(&self) -> Option<Arc<Snapshot>> {
        let slot = self.slot.read().await;
        let snapshot = slot.as_ref()?;
        let age = Utc::now().signed_duration_since(snapshot.fetched_at);
        // A negative age means the wall clock moved backwards; refetch.
        let fresh = age
            .to_std()
            .map(|age| age < self.ttl)
            .unwrap_or(false);
        fresh.then(|| snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::test_support::quote;
    use crate::domain::quote::Quote;
    use crate::error::HttpError;
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
        fail: AtomicBool,
        delay_ms: u64,
    }

    impl CountingFetcher {
        fn slow(delay_ms: u64) -> Self {
            Self {
                delay_ms,
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MarketFetch for CountingFetcher {
        async fn fetch_markets(&self, _query: &MarketQuery) -> Result<Vec<Quote>, SdkError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as i64 + 1;
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(SdkError::Http(HttpError::ServerError {
                    status: 503,
                    body: "unavailable".to_string(),
                }));
            }
            Ok(vec![quote("bitcoin", 100 * n, Some(1))])
        }
    }

    #[tokio::test]
    async fn test_second_get_within_ttl_is_a_hit() {
        let cache = QuoteCache::with_defaults(CountingFetcher::default());
        let first = cache.get(false).await.unwrap();
        let second = cache.get(false).await.unwrap();
        assert_eq!(cache.fetcher().calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_fresh().await);
    }

    #[tokio::test]
    async fn test_forced_get_always_fetches() {
        let cache = QuoteCache::with_defaults(CountingFetcher::default());
        cache.get(false).await.unwrap();
        let forced = cache.get(true).await.unwrap();
        assert_eq!(cache.fetcher().calls(), 2);
        assert_eq!(forced.quotes[0].current_price, rust_decimal::Decimal::from(200));
    }

    #[tokio::test]
    async fn test_expired_snapshot_refetches() {
        let cache = QuoteCache::new(
            CountingFetcher::default(),
            MarketQuery::default(),
            Duration::from_millis(10),
        );
        cache.get(false).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!cache.is_fresh().await);
        cache.get(false).await.unwrap();
        assert_eq!(cache.fetcher().calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_stale_snapshot() {
        let cache = QuoteCache::with_defaults(CountingFetcher::default());
        let good = cache.get(false).await.unwrap();

        cache.fetcher().fail.store(true, Ordering::SeqCst);
        let err = cache.get(true).await.unwrap_err();
        assert!(err.is_transport());

        let stale = cache.peek().await.unwrap();
        assert!(Arc::ptr_eq(&good, &stale));
    }

    #[tokio::test]
    async fn test_concurrent_gets_share_one_fetch() {
        let cache = QuoteCache::with_defaults(CountingFetcher::slow(20));
        let (a, b) = futures_util::join!(cache.get(false), cache.get(false));
        assert_eq!(cache.fetcher().calls(), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }

    #[tokio::test]
    async fn test_concurrent_failure_is_shared() {
        let cache = QuoteCache::with_defaults(CountingFetcher::slow(20));
        cache.fetcher().fail.store(true, Ordering::SeqCst);
        let (a, b) = futures_util::join!(cache.get(true), cache.get(true));
        assert_eq!(cache.fetcher().calls(), 1);
        assert!(matches!(a, Err(SdkError::Http(_))));
        assert!(matches!(b, Err(SdkError::RefreshFailed(_))));
        assert!(cache.peek().await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_forces_fetch() {
        let cache = QuoteCache::with_defaults(CountingFetcher::default());
        cache.get(false).await.unwrap();
        cache.invalidate().await;
        assert!(cache.peek().await.is_none());
        cache.get(false).await.unwrap();
        assert_eq!(cache.fetcher().calls(), 2);
    }
}
