//! Network and timing constants.

use std::time::Duration;

/// Default REST API base URL (CoinGecko public API v3).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Default quote currency for prices and market caps.
pub const DEFAULT_VS_CURRENCY: &str = "usd";

/// Default page size for the market table.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// How long a market snapshot stays fresh.
pub const DEFAULT_MARKET_CACHE_TTL: Duration = Duration::from_millis(60_000);

/// Auto-refresh period of the market view.
pub const MARKET_REFRESH_PERIOD: Duration = Duration::from_millis(60_000);
