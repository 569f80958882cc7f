//! # marketboard
//!
//! Market data core for a crypto dashboard, backed by the CoinGecko API and
//! usable on both native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Domain types, the quote cache, series projection, trend
//!    classification, portfolio valuation and table filtering/sorting
//!    (always available, WASM-safe, network-free)
//! 2. **HTTP API** — `CoinGeckoHttp` with a configurable retry policy
//! 3. **High-Level Client** — `MarketboardClient` with nested sub-clients;
//!    implements the collaborator traits the core is written against
//! 4. **Dashboard** — `Dashboard`, the application state controller with
//!    stale-response guards and the market auto-refresh loop
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marketboard::prelude::*;
//! use std::sync::Arc;
//!
//! let client = MarketboardClient::builder().vs_currency("usd").build()?;
//! let dashboard = Arc::new(Dashboard::new(client.quote_cache(), MemoryStore::new()));
//!
//! let rows = dashboard.load_market(false).await?;
//! let sparklines: Vec<_> = rows.iter().filter_map(sparkline).collect();
//! tokio::spawn(dashboard.start_auto_refresh());
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, trend classification and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, logic.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network and timing constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `MarketboardClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Dashboard ───────────────────────────────────────────────────────

/// Application state controller.
pub mod dashboard;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, ChartRange, Trend};

    // Domain types — quotes, cache, table
    pub use crate::domain::quote::{
        MarketFetch, MarketQuery, MarketView, Quote, QuoteCache, Snapshot, SortDirection, SortKey,
        SortState, TrendingFetch,
    };

    // Domain types — price history + projection
    pub use crate::domain::price_history::{
        DetailChart, Projection, ProjectionMode, Series, SeriesFetch, SeriesPoint, Sparkline,
    };

    // Domain types — asset detail, search
    pub use crate::domain::asset::{AssetDetail, AssetFetch, MarketData};
    pub use crate::domain::search::{CoinListFetch, CoinListing, SearchHit, TrendingCoin};

    // Domain types — portfolio
    pub use crate::domain::portfolio::{
        aggregate, Holding, HoldingValuation, HoldingsStore, MemoryStore, Portfolio,
        PortfolioManager, Valuation,
    };
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::domain::portfolio::store::JsonFileStore;
    #[cfg(feature = "wasm")]
    pub use crate::domain::portfolio::store::LocalStorageStore;

    // Errors
    pub use crate::error::{HttpError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_VS_CURRENCY, MARKET_REFRESH_PERIOD};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AssetsClient, MarketboardClient, MarketboardClientBuilder, MarketsClient,
        PriceHistoryClient, SearchClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};

    // Dashboard
    pub use crate::dashboard::{sparkline, Dashboard, DetailView, Loaded, MarketSource, View};
}
