//! Application state controller — one owner for everything the UI shows.
//!
//! `Dashboard` holds the active view, the market snapshot cache, the market
//! table state (search, sort, expanded rows), the latest portfolio valuation,
//! trending quotes, the open detail view and the auto-refresh handle. It
//! returns data (rows, projections, valuations); rendering is the host's job.
//!
//! All methods take `&self`, so a host can share the dashboard behind an `Arc`
//! between UI callbacks and the refresh loop. State locks are never held
//! across a fetch.

pub mod refresh;
pub mod sequence;

pub use refresh::RefreshTimer;
pub use sequence::{RequestSequence, RequestToken};

use crate::domain::asset::{AssetDetail, AssetFetch};
use crate::domain::portfolio::{
    fetch_valuation, parse_quantity, HoldingsStore, Portfolio, PortfolioManager, Valuation,
};
use crate::domain::price_history::{DetailChart, SeriesFetch, Sparkline};
use crate::domain::quote::{
    MarketFetch, MarketView, Quote, QuoteCache, SortDirection, SortKey, SortState, TrendingFetch,
};
use crate::domain::search::{suggest, CoinListFetch, CoinListing, SUGGESTION_LIMIT};
use crate::error::SdkError;
use crate::network::MARKET_REFRESH_PERIOD;
use crate::shared::{AssetId, ChartRange};

use async_lock::RwLock;
use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Detail chart width used until the host reports its container width.
pub const DEFAULT_CHART_WIDTH: f64 = 800.0;

/// Range a detail view opens with.
pub const DEFAULT_DETAIL_RANGE: ChartRange = ChartRange::Day7;

/// Everything the dashboard fetches from.
pub trait MarketSource:
    MarketFetch + TrendingFetch + AssetFetch + SeriesFetch + CoinListFetch
{
}

impl<T> MarketSource for T where
    T: MarketFetch + TrendingFetch + AssetFetch + SeriesFetch + CoinListFetch
{
}

// ─── View state ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Market,
    Portfolio,
    Trending,
    Detail(AssetId),
}

/// The open detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub asset: AssetDetail,
    pub range: ChartRange,
    /// `None` while loading, on failure, or when the range has no data.
    pub chart: Option<DetailChart>,
}

/// Result of a guarded load: `Stale` when a newer request superseded it and
/// the result was discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Current(T),
    Stale,
}

impl<T> Loaded<T> {
    pub fn current(self) -> Option<T> {
        match self {
            Loaded::Current(v) => Some(v),
            Loaded::Stale => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Loaded::Stale)
    }
}

struct State {
    view: View,
    market: MarketView,
    expanded: HashSet<AssetId>,
    valuation: Option<Valuation>,
    trending: Vec<Quote>,
    coin_list: Vec<CoinListing>,
    detail: Option<DetailView>,
    chart_width: f64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            view: View::default(),
            market: MarketView::new(),
            expanded: HashSet::new(),
            valuation: None,
            trending: Vec::new(),
            coin_list: Vec::new(),
            detail: None,
            chart_width: DEFAULT_CHART_WIDTH,
        }
    }
}

/// Sparkline of a quote's embedded 7-day series, coloured by its 7-day change.
pub fn sparkline(quote: &Quote) -> Option<Sparkline> {
    Sparkline::render(&quote.sparkline, quote.price_change_percentage_7d)
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

pub struct Dashboard<C, S> {
    cache: QuoteCache<C>,
    holdings: PortfolioManager<S>,
    state: RwLock<State>,
    detail_requests: RequestSequence,
    chart_requests: RequestSequence,
    refresh: Mutex<Option<RefreshTimer>>,
}

impl<C: MarketSource, S: HoldingsStore> Dashboard<C, S> {
    /// The cache's fetcher serves every other request as well.
    pub fn new(cache: QuoteCache<C>, store: S) -> Self {
        Self {
            cache,
            holdings: PortfolioManager::new(store),
            state: RwLock::new(State::default()),
            detail_requests: RequestSequence::new(),
            chart_requests: RequestSequence::new(),
            refresh: Mutex::new(None),
        }
    }

    pub fn cache(&self) -> &QuoteCache<C> {
        &self.cache
    }

    pub fn holdings(&self) -> &PortfolioManager<S> {
        &self.holdings
    }

    fn source(&self) -> &C {
        self.cache.fetcher()
    }

    pub async fn view(&self) -> View {
        self.state.read().await.view.clone()
    }

    /// Switch views and load what the new view shows. Leaving a detail view
    /// discards it along with any detail or chart request still in flight.
    pub async fn switch_view(&self, view: View) -> Result<(), SdkError> {
        if let View::Detail(id) = &view {
            return self.load_detail(id).await.map(|_| ());
        }
        {
            let mut state = self.state.write().await;
            state.view = view.clone();
            state.detail = None;
        }
        self.detail_requests.invalidate();
        self.chart_requests.invalidate();

        match view {
            View::Market => self.load_market(false).await.map(|_| ()),
            View::Portfolio => self.load_portfolio().await.map(|_| ()),
            View::Trending => self.load_trending().await.map(|_| ()),
            View::Detail(_) => Ok(()),
        }
    }

    // ── Market table ─────────────────────────────────────────────────────

    /// Read the snapshot through the cache and rebuild the table rows.
    ///
    /// On failure the previous rows stay in place.
    pub async fn load_market(&self, force_refresh: bool) -> Result<Vec<Quote>, SdkError> {
        let snapshot = self.cache.get(force_refresh).await?;
        let mut state = self.state.write().await;
        state.market.set_snapshot(snapshot);
        Ok(state.market.rows().to_vec())
    }

    /// Visible rows: filtered by the search text, then sorted.
    pub async fn rows(&self) -> Vec<Quote> {
        self.state.read().await.market.rows().to_vec()
    }

    pub async fn search(&self, query: &str) -> Vec<Quote> {
        let mut state = self.state.write().await;
        state.market.set_query(query);
        state.market.rows().to_vec()
    }

    pub async fn clear_search(&self) -> Vec<Quote> {
        self.search("").await
    }

    /// Header click on `key`; returns the new direction.
    pub async fn sort_by(&self, key: SortKey) -> SortDirection {
        self.state.write().await.market.select_sort(key)
    }

    /// Header click by column name. Unknown columns change nothing.
    pub async fn sort_by_column(&self, column: &str) -> Option<SortDirection> {
        let key = SortKey::from_column(column)?;
        Some(self.sort_by(key).await)
    }

    pub async fn sort_state(&self) -> SortState {
        self.state.read().await.market.sort_state()
    }

    /// Expand or collapse a table row; returns whether it is now expanded.
    pub async fn toggle_expanded(&self, id: &AssetId) -> bool {
        let mut state = self.state.write().await;
        if state.expanded.remove(id) {
            false
        } else {
            state.expanded.insert(id.clone());
            true
        }
    }

    pub async fn is_expanded(&self, id: &AssetId) -> bool {
        self.state.read().await.expanded.contains(id)
    }

    // ── Portfolio ────────────────────────────────────────────────────────

    /// Value the stored holdings against fresh quotes (the snapshot cache is
    /// bypassed). On failure the previous valuation stays in place.
    pub async fn load_portfolio(&self) -> Result<Valuation, SdkError> {
        let portfolio = self.holdings.load().await;
        let valuation = fetch_valuation(self.source(), &portfolio, self.cache.query()).await?;
        self.state.write().await.valuation = Some(valuation.clone());
        Ok(valuation)
    }

    pub async fn valuation(&self) -> Option<Valuation> {
        self.state.read().await.valuation.clone()
    }

    /// Add `quantity` (as typed) of `id`, replacing any existing holding.
    pub async fn add_holding(&self, id: AssetId, quantity: &str) -> Result<Portfolio, SdkError> {
        let quantity = parse_quantity(quantity)?;
        let portfolio = self.holdings.add(id, quantity).await?;
        self.revalue_if_visible().await;
        Ok(portfolio)
    }

    pub async fn update_holding(
        &self,
        id: &AssetId,
        quantity: &str,
    ) -> Result<Portfolio, SdkError> {
        let quantity = parse_quantity(quantity)?;
        let portfolio = self.holdings.update(id, quantity).await?;
        self.revalue_if_visible().await;
        Ok(portfolio)
    }

    pub async fn remove_holding(&self, id: &AssetId) -> Result<Portfolio, SdkError> {
        let portfolio = self.holdings.remove(id).await?;
        self.revalue_if_visible().await;
        Ok(portfolio)
    }

    async fn revalue_if_visible(&self) {
        if self.view().await != View::Portfolio {
            return;
        }
        if let Err(e) = self.load_portfolio().await {
            tracing::warn!("Portfolio revaluation failed: {}", e);
        }
    }

    // ── Trending & coin directory ────────────────────────────────────────

    pub async fn load_trending(&self) -> Result<Vec<Quote>, SdkError> {
        let quotes = self.source().fetch_trending().await?;
        self.state.write().await.trending = quotes.clone();
        Ok(quotes)
    }

    pub async fn trending(&self) -> Vec<Quote> {
        self.state.read().await.trending.clone()
    }

    /// Load the coin directory for the holdings picker. Returns its size.
    pub async fn load_coin_list(&self) -> Result<usize, SdkError> {
        let listings = self.source().fetch_coin_list().await.inspect_err(|e| {
            tracing::warn!("Coin list unavailable, picker stays empty: {}", e);
        })?;
        let count = listings.len();
        self.state.write().await.coin_list = listings;
        Ok(count)
    }

    /// Picker suggestions for `query`.
    pub async fn suggest_coins(&self, query: &str) -> Vec<CoinListing> {
        let state = self.state.read().await;
        suggest(&state.coin_list, query, SUGGESTION_LIMIT)
            .into_iter()
            .cloned()
            .collect()
    }

    // ── Detail view ──────────────────────────────────────────────────────

    /// Open the detail view of `id` and load its default-range chart.
    ///
    /// Chart failures are logged and leave `chart` empty; the detail itself
    /// still loads. A newer detail request makes this one `Stale`.
    pub async fn load_detail(&self, id: &AssetId) -> Result<Loaded<DetailView>, SdkError> {
        if id.as_str().trim().is_empty() {
            return Err(SdkError::Validation("asset id is required".to_string()));
        }
        let token = self.detail_requests.next();
        self.chart_requests.invalidate();
        {
            let mut state = self.state.write().await;
            state.view = View::Detail(id.clone());
            state.detail = None;
        }

        let fetched = self.source().fetch_asset(id).await;
        if !self.detail_requests.is_current(token) {
            tracing::debug!(asset = %id, "Discarding superseded detail response");
            return Ok(Loaded::Stale);
        }
        let asset = fetched?;

        self.state.write().await.detail = Some(DetailView {
            asset,
            range: DEFAULT_DETAIL_RANGE,
            chart: None,
        });

        if let Err(e) = self.load_chart(id, DEFAULT_DETAIL_RANGE).await {
            tracing::warn!(asset = %id, "Chart load failed: {}", e);
        }

        match self.detail().await {
            Some(detail) if self.detail_requests.is_current(token) => Ok(Loaded::Current(detail)),
            _ => Ok(Loaded::Stale),
        }
    }

    /// Load the chart of the open detail view for `range`.
    ///
    /// `Current(None)` means the range has no data. A newer chart or detail
    /// request makes this one `Stale`.
    pub async fn load_chart(
        &self,
        id: &AssetId,
        range: ChartRange,
    ) -> Result<Loaded<Option<DetailChart>>, SdkError> {
        let token = self.chart_requests.next();
        {
            let mut state = self.state.write().await;
            if let Some(detail) = state.detail.as_mut().filter(|d| &d.asset.id == id) {
                detail.range = range;
                detail.chart = None;
            }
        }

        let fetched = self.source().fetch_series(id, range).await;
        if !self.chart_requests.is_current(token) {
            tracing::debug!(asset = %id, %range, "Discarding superseded chart response");
            return Ok(Loaded::Stale);
        }
        let series = fetched?;

        let mut state = self.state.write().await;
        let chart = DetailChart::render(&series, state.chart_width);
        if let Some(detail) = state.detail.as_mut().filter(|d| &d.asset.id == id) {
            detail.chart = chart.clone();
        }
        Ok(Loaded::Current(chart))
    }

    pub async fn detail(&self) -> Option<DetailView> {
        self.state.read().await.detail.clone()
    }

    /// Width of the host's chart container; applies to the next chart load.
    pub async fn set_chart_width(&self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state.write().await.chart_width = width;
        }
    }

    // ── Auto-refresh ─────────────────────────────────────────────────────

    /// One refresh tick: force-refresh the market snapshot, but only while
    /// the market view is showing. Returns whether a refresh ran.
    pub async fn auto_refresh_tick(&self) -> bool {
        if self.view().await != View::Market {
            return false;
        }
        // The cache warns on failure; the table keeps its rows.
        if let Err(e) = self.load_market(true).await {
            tracing::debug!("Auto-refresh tick kept the previous rows: {}", e);
        }
        true
    }

    /// Start the market auto-refresh at the default period.
    pub fn start_auto_refresh(self: &Arc<Self>) -> impl Future<Output = ()> {
        self.start_auto_refresh_every(MARKET_REFRESH_PERIOD)
    }

    /// Start (or restart) the auto-refresh loop and return it for the host to
    /// spawn. The loop holds only a weak reference: dropping the dashboard,
    /// calling [`Self::stop_auto_refresh`] or starting a new loop stops it.
    pub fn start_auto_refresh_every(
        self: &Arc<Self>,
        period: Duration,
    ) -> impl Future<Output = ()> {
        let dashboard = Arc::downgrade(self);
        let (timer, task) = RefreshTimer::start(period, move || {
            let dashboard = dashboard.clone();
            async move {
                if let Some(dashboard) = dashboard.upgrade() {
                    dashboard.auto_refresh_tick().await;
                }
            }
        });
        let previous = self.refresh_slot().replace(timer);
        drop(previous);
        task
    }

    pub fn stop_auto_refresh(&self) {
        let previous = self.refresh_slot().take();
        drop(previous);
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.refresh_slot()
            .as_ref()
            .is_some_and(|timer| !timer.is_stopped())
    }

    fn refresh_slot(&self) -> MutexGuard<'_, Option<RefreshTimer>> {
        self.refresh.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
