//! Market table view — text filter, column sort, derived row list.

use super::{Quote, Snapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::sync::Arc;

// ─── Sort ────────────────────────────────────────────────────────────────────

/// Sortable column of the market table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Price,
    Change24h,
    Change7d,
    Change30d,
    MarketCap,
    Volume,
    Rank,
}

impl SortKey {
    /// Map a table column name (the upstream field name) to a key.
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "current_price" => Some(SortKey::Price),
            "price_change_percentage_24h" => Some(SortKey::Change24h),
            "price_change_percentage_7d_in_currency" | "price_change_percentage_7d" => {
                Some(SortKey::Change7d)
            }
            "price_change_percentage_30d_in_currency" | "price_change_percentage_30d" => {
                Some(SortKey::Change30d)
            }
            "market_cap" => Some(SortKey::MarketCap),
            "total_volume" => Some(SortKey::Volume),
            "market_cap_rank" => Some(SortKey::Rank),
            _ => None,
        }
    }

    pub fn as_column(&self) -> &'static str {
        match self {
            SortKey::Price => "current_price",
            SortKey::Change24h => "price_change_percentage_24h",
            SortKey::Change7d => "price_change_percentage_7d_in_currency",
            SortKey::Change30d => "price_change_percentage_30d_in_currency",
            SortKey::MarketCap => "market_cap",
            SortKey::Volume => "total_volume",
            SortKey::Rank => "market_cap_rank",
        }
    }

    /// Numeric value of this column for `quote`; missing is zero.
    pub fn value(&self, quote: &Quote) -> Decimal {
        let field = match self {
            SortKey::Price => Some(quote.current_price),
            SortKey::Change24h => quote.price_change_percentage_24h,
            SortKey::Change7d => quote.price_change_percentage_7d,
            SortKey::Change30d => quote.price_change_percentage_30d,
            SortKey::MarketCap => quote.market_cap,
            SortKey::Volume => quote.total_volume,
            SortKey::Rank => quote.market_cap_rank.map(Decimal::from),
        };
        field.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header arrow.
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Active sort column and direction. No column means snapshot order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: the active column flips direction, another column
    /// becomes active in ascending order.
    pub fn select(&mut self, key: SortKey) -> SortDirection {
        if self.key == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Asc;
        }
        self.direction
    }
}

/// Stable numeric sort; rows with equal values keep their relative order in
/// both directions.
pub fn sort<Q: Borrow<Quote>>(quotes: &mut [Q], key: SortKey, direction: SortDirection) {
    quotes.sort_by(|a, b| {
        let ord = key.value(a.borrow()).cmp(&key.value(b.borrow()));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Case-insensitive substring match on name or symbol.
///
/// A query that is empty after trimming keeps every row.
pub fn filter<Q: Borrow<Quote>>(mut quotes: Vec<Q>, query: &str) -> Vec<Q> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return quotes;
    }
    quotes.retain(|q| matches_query(q.borrow(), &needle));
    quotes
}

fn matches_query(quote: &Quote, needle: &str) -> bool {
    quote.name.to_lowercase().contains(needle) || quote.symbol.to_lowercase().contains(needle)
}

// ─── MarketView ──────────────────────────────────────────────────────────────

/// The market table as shown: current snapshot, search text, sort state and
/// the rows derived from them.
///
/// Rows are recomputed (filter, then sort) whenever any input changes, so a
/// background refresh keeps the user's search and sort.
#[derive(Debug, Clone, Default)]
pub struct MarketView {
    snapshot: Option<Arc<Snapshot>>,
    query: String,
    sort: SortState,
    rows: Vec<Quote>,
}

impl MarketView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_snapshot(&mut self, snapshot: Arc<Snapshot>) {
        self.snapshot = Some(snapshot);
        self.rebuild();
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
        self.rebuild();
    }

    pub fn clear_query(&mut self) {
        self.set_query("");
    }

    /// Apply a header click; returns the resulting direction.
    pub fn select_sort(&mut self, key: SortKey) -> SortDirection {
        let direction = self.sort.select(key);
        self.rebuild();
        direction
    }

    pub fn rows(&self) -> &[Quote] {
        &self.rows
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    /// `true` when a snapshot is loaded but nothing matches.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn rebuild(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            self.rows.clear();
            return;
        };
        let mut rows = filter(snapshot.quotes.iter().collect::<Vec<_>>(), &self.query);
        if let Some(key) = self.sort.key {
            sort(&mut rows, key, self.sort.direction);
        }
        self.rows = rows.into_iter().cloned().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::test_support::quote;

    fn ids<Q: Borrow<Quote>>(quotes: &[Q]) -> Vec<String> {
        quotes.iter().map(|q| q.borrow().id.to_string()).collect()
    }

    fn sample() -> Vec<Quote> {
        let mut btc = quote("bitcoin", 60000, Some(2));
        btc.symbol = "btc".into();
        btc.name = "Bitcoin".into();
        let mut eth = quote("ethereum", 3000, None);
        eth.symbol = "eth".into();
        eth.name = "Ethereum".into();
        let mut wbtc = quote("wrapped-bitcoin", 60000, Some(-1));
        wbtc.symbol = "wbtc".into();
        wbtc.name = "Wrapped Bitcoin".into();
        vec![btc, eth, wbtc]
    }

    #[test]
    fn test_filter_empty_query_is_identity() {
        assert_eq!(ids(&filter(sample(), "")), ids(&sample()));
        assert_eq!(ids(&filter(sample(), "   ")), ids(&sample()));
    }

    #[test]
    fn test_filter_matches_name_or_symbol_case_insensitive() {
        assert_eq!(ids(&filter(sample(), "BITCOIN")), vec!["bitcoin", "wrapped-bitcoin"]);
        assert_eq!(ids(&filter(sample(), " eth ")), vec!["ethereum"]);
        assert!(filter(sample(), "doge").is_empty());
    }

    #[test]
    fn test_sort_missing_values_are_zero() {
        let mut rows = sample();
        sort(&mut rows, SortKey::Change24h, SortDirection::Asc);
        assert_eq!(ids(&rows), vec!["wrapped-bitcoin", "ethereum", "bitcoin"]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut rows = sample();
        sort(&mut rows, SortKey::Price, SortDirection::Desc);
        let once = ids(&rows);
        assert_eq!(once, vec!["bitcoin", "wrapped-bitcoin", "ethereum"]);
        sort(&mut rows, SortKey::Price, SortDirection::Desc);
        assert_eq!(ids(&rows), once);

        sort(&mut rows, SortKey::Price, SortDirection::Asc);
        assert_eq!(ids(&rows), vec!["ethereum", "bitcoin", "wrapped-bitcoin"]);
        sort(&mut rows, SortKey::Price, SortDirection::Desc);
        assert_eq!(ids(&rows), once);
    }

    #[test]
    fn test_sort_state_select() {
        let mut state = SortState::default();
        assert_eq!(state.select(SortKey::Price), SortDirection::Asc);
        assert_eq!(state.select(SortKey::Price), SortDirection::Desc);
        assert_eq!(state.select(SortKey::MarketCap), SortDirection::Asc);
        assert_eq!(state.key, Some(SortKey::MarketCap));
    }

    #[test]
    fn test_sort_key_columns() {
        for key in [
            SortKey::Price,
            SortKey::Change24h,
            SortKey::Change7d,
            SortKey::Change30d,
            SortKey::MarketCap,
            SortKey::Volume,
            SortKey::Rank,
        ] {
            assert_eq!(SortKey::from_column(key.as_column()), Some(key));
        }
        assert_eq!(SortKey::from_column("name"), None);
    }

    #[test]
    fn test_market_view_keeps_query_and_sort_across_snapshots() {
        let mut view = MarketView::new();
        view.set_query("bitcoin");
        view.select_sort(SortKey::Change24h);
        view.set_snapshot(Arc::new(Snapshot::new(sample())));
        assert_eq!(ids(view.rows()), vec!["wrapped-bitcoin", "bitcoin"]);

        let mut next = sample();
        next[0].price_change_percentage_24h = Some(Decimal::from(-5));
        view.set_snapshot(Arc::new(Snapshot::new(next)));
        assert_eq!(ids(view.rows()), vec!["bitcoin", "wrapped-bitcoin"]);

        view.clear_query();
        assert_eq!(view.rows().len(), 3);
    }
}
