//! Portfolio domain — user holdings, their persistence and valuation.

mod convert;
pub mod store;
pub mod valuation;
pub mod wire;

use crate::domain::quote::{MarketFetch, MarketQuery};
use crate::error::SdkError;
use crate::shared::{parse_decimal, AssetId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use convert::{decode_record, encode_record};
pub use store::{HoldingsStore, MemoryStore, PortfolioManager};
pub use valuation::{aggregate, HoldingValuation, Valuation};

// ─── Holding ─────────────────────────────────────────────────────────────────

/// A quantity of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub asset_id: AssetId,
    pub quantity: Decimal,
}

impl Holding {
    pub fn new(asset_id: impl Into<AssetId>, quantity: Decimal) -> Self {
        Self {
            asset_id: asset_id.into(),
            quantity,
        }
    }
}

/// Reject zero, negative and missing quantities.
pub fn validate_quantity(quantity: Decimal) -> Result<Decimal, SdkError> {
    if quantity <= Decimal::ZERO {
        return Err(SdkError::Validation(format!(
            "quantity must be greater than zero, got {}",
            quantity
        )));
    }
    Ok(quantity)
}

/// Parse a quantity typed by the user.
pub fn parse_quantity(input: &str) -> Result<Decimal, SdkError> {
    let quantity = parse_decimal(input)
        .ok_or_else(|| SdkError::Validation(format!("not a number: {:?}", input.trim())))?;
    validate_quantity(quantity)
}

// ─── Portfolio ───────────────────────────────────────────────────────────────

/// Ordered holdings, at most one per asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity of `asset_id`, appending a new holding if absent.
    pub fn upsert(&mut self, asset_id: AssetId, quantity: Decimal) {
        match self.holdings.iter_mut().find(|h| h.asset_id == asset_id) {
            Some(existing) => existing.quantity = quantity,
            None => self.holdings.push(Holding { asset_id, quantity }),
        }
    }

    /// Change the quantity of an existing holding. Returns `false` if absent.
    pub fn update(&mut self, asset_id: &AssetId, quantity: Decimal) -> bool {
        match self.holdings.iter_mut().find(|h| &h.asset_id == asset_id) {
            Some(existing) => {
                existing.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a holding. Returns `false` if absent.
    pub fn remove(&mut self, asset_id: &AssetId) -> bool {
        let before = self.holdings.len();
        self.holdings.retain(|h| &h.asset_id != asset_id);
        self.holdings.len() != before
    }

    pub fn get(&self, asset_id: &AssetId) -> Option<&Holding> {
        self.holdings.iter().find(|h| &h.asset_id == asset_id)
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn ids(&self) -> impl Iterator<Item = &AssetId> + '_ {
        self.holdings.iter().map(|h| &h.asset_id)
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

impl FromIterator<Holding> for Portfolio {
    /// Later holdings for the same asset replace earlier ones in place.
    fn from_iter<I: IntoIterator<Item = Holding>>(iter: I) -> Self {
        let mut portfolio = Portfolio::new();
        for h in iter {
            portfolio.upsert(h.asset_id, h.quantity);
        }
        portfolio
    }
}

// ─── Live valuation ──────────────────────────────────────────────────────────

/// Fetch quotes for every held asset (bypassing any snapshot cache) and value
/// the portfolio. An empty portfolio values to zero without a request.
///
/// `base` supplies the currency; ids and page size are set from the holdings.
pub async fn fetch_valuation<F: MarketFetch>(
    fetcher: &F,
    portfolio: &Portfolio,
    base: &MarketQuery,
) -> Result<Valuation, SdkError> {
    if portfolio.is_empty() {
        return Ok(Valuation::default());
    }
    let query = MarketQuery::for_ids(portfolio.ids().cloned())
        .vs_currency(&base.vs_currency)
        .sparkline(true);
    let quotes = fetcher.fetch_markets(&query).await?;
    Ok(aggregate(portfolio.holdings(), &quotes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_upsert_update_remove() {
        let btc = AssetId::from("bitcoin");
        let eth = AssetId::from("ethereum");
        let mut p = Portfolio::new();
        p.upsert(btc.clone(), dec("1"));
        p.upsert(eth.clone(), dec("2"));
        p.upsert(btc.clone(), dec("0.5"));
        assert_eq!(p.len(), 2);
        assert_eq!(p.get(&btc).unwrap().quantity, dec("0.5"));
        assert_eq!(p.ids().next(), Some(&btc));

        assert!(p.update(&eth, dec("3")));
        assert!(!p.update(&AssetId::from("solana"), dec("3")));
        assert!(p.get(&AssetId::from("solana")).is_none());

        assert!(p.remove(&btc));
        assert!(!p.remove(&btc));
        assert_eq!(p.holdings(), &[Holding::new("ethereum", dec("3"))]);
    }

    #[test]
    fn test_from_iter_collapses_duplicates() {
        let p: Portfolio = vec![
            Holding::new("a", dec("1")),
            Holding::new("b", dec("2")),
            Holding::new("a", dec("5")),
        ]
        .into_iter()
        .collect();
        assert_eq!(p.len(), 2);
        assert_eq!(p.holdings()[0].quantity, dec("5"));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 1.25 ").unwrap(), dec("1.25"));
        assert!(matches!(parse_quantity("abc"), Err(SdkError::Validation(_))));
        assert!(matches!(parse_quantity("0"), Err(SdkError::Validation(_))));
        assert!(matches!(parse_quantity("-1"), Err(SdkError::Validation(_))));
        assert!(parse_quantity("").is_err());
    }
}
