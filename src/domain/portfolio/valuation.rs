//! Holdings × quotes → portfolio value and 24h change.
//!
//! Total: never fails. Holdings without a quote are left out of the totals and
//! reported in [`Valuation::unpriced`]; arithmetic saturates at `Decimal`'s
//! bounds instead of overflowing.

use super::Holding;
use crate::domain::quote::Quote;
use crate::shared::{AssetId, Trend};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One priced holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValuation {
    pub asset_id: AssetId,
    pub quantity: Decimal,
    /// The quote the value was computed from (name, symbol, sparkline, …).
    pub quote: Quote,
    /// `quantity × current_price`.
    pub value: Decimal,
    /// 24h change in percent; missing upstream is zero.
    pub change_24h: Decimal,
    /// Value gained or lost over 24h: `value × change_24h / 100`.
    pub change_value: Decimal,
}

impl HoldingValuation {
    pub fn trend(&self) -> Trend {
        Trend::classify(Some(self.change_24h))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub total_value: Decimal,
    pub total_change: Decimal,
    /// `total_change / total_value × 100`, zero when there is no value.
    pub total_change_percent: Decimal,
    /// Highest value first.
    pub holdings: Vec<HoldingValuation>,
    /// Held assets with no quote in the market data.
    pub unpriced: Vec<AssetId>,
}

impl Valuation {
    pub fn trend(&self) -> Trend {
        Trend::classify(Some(self.total_change))
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// Value `holdings` against `quotes`.
pub fn aggregate(holdings: &[Holding], quotes: &[Quote]) -> Valuation {
    let by_id: HashMap<&AssetId, &Quote> = quotes.iter().map(|q| (&q.id, q)).collect();

    let mut valuation = Valuation::default();

    for holding in holdings {
        let Some(quote) = by_id.get(&holding.asset_id) else {
            tracing::debug!(asset = %holding.asset_id, "No quote for holding, leaving it out");
            valuation.unpriced.push(holding.asset_id.clone());
            continue;
        };

        let value = holding.quantity.saturating_mul(quote.current_price);
        let change_24h = quote.price_change_percentage_24h.unwrap_or(Decimal::ZERO);
        let change_value = value.saturating_mul(change_24h / Decimal::ONE_HUNDRED);

        valuation.total_value = valuation.total_value.saturating_add(value);
        valuation.total_change = valuation.total_change.saturating_add(change_value);
        valuation.holdings.push(HoldingValuation {
            asset_id: holding.asset_id.clone(),
            quantity: holding.quantity,
            quote: (*quote).clone(),
            value,
            change_24h,
            change_value,
        });
    }

    if valuation.total_value > Decimal::ZERO {
        valuation.total_change_percent = valuation
            .total_change
            .checked_div(valuation.total_value)
            .map(|ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO);
    }

    // Stable: equal values keep holdings order.
    valuation.holdings.sort_by(|a, b| b.value.cmp(&a.value));
    valuation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::test_support::quote;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_empty_holdings_value_to_zero() {
        let v = aggregate(&[], &[quote("a", 100, Some(10))]);
        assert_eq!(v.total_value, Decimal::ZERO);
        assert_eq!(v.total_change, Decimal::ZERO);
        assert_eq!(v.total_change_percent, Decimal::ZERO);
        assert!(v.holdings.is_empty());
        assert!(v.unpriced.is_empty());
    }

    #[test]
    fn test_single_holding() {
        let v = aggregate(&[Holding::new("a", dec(2))], &[quote("a", 100, Some(10))]);
        assert_eq!(v.total_value, dec(200));
        assert_eq!(v.total_change, dec(20));
        assert_eq!(v.total_change_percent, dec(10));
        assert_eq!(v.holdings[0].change_value, dec(20));
        assert_eq!(v.trend(), Trend::Positive);
    }

    #[test]
    fn test_sorted_by_value_desc() {
        let holdings = [Holding::new("a", dec(1)), Holding::new("b", dec(1))];
        let quotes = [quote("a", 50, None), quote("b", 500, None)];
        let v = aggregate(&holdings, &quotes);
        let ids: Vec<&str> = v.holdings.iter().map(|h| h.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(v.total_change, Decimal::ZERO);
        assert_eq!(v.total_change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_equal_values_keep_holdings_order() {
        let holdings = [Holding::new("x", dec(2)), Holding::new("y", dec(1))];
        let quotes = [quote("y", 100, None), quote("x", 50, None)];
        let v = aggregate(&holdings, &quotes);
        let ids: Vec<&str> = v.holdings.iter().map(|h| h.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_unpriced_holdings_excluded() {
        let holdings = [Holding::new("a", dec(1)), Holding::new("gone", dec(5))];
        let v = aggregate(&holdings, &[quote("a", 10, Some(-50))]);
        assert_eq!(v.total_value, dec(10));
        assert_eq!(v.total_change, dec(-5));
        assert_eq!(v.total_change_percent, dec(-50));
        assert_eq!(v.unpriced, vec![AssetId::from("gone")]);
        assert_eq!(v.trend(), Trend::Negative);
        assert_eq!(v.holdings[0].trend(), Trend::Negative);
    }

    #[test]
    fn test_zero_price_means_zero_percent() {
        let v = aggregate(&[Holding::new("a", dec(3))], &[quote("a", 0, Some(25))]);
        assert_eq!(v.total_value, Decimal::ZERO);
        assert_eq!(v.total_change_percent, Decimal::ZERO);
        assert_eq!(v.holdings.len(), 1);
    }

    #[test]
    fn test_huge_values_saturate() {
        let v = aggregate(
            &[Holding::new("a", Decimal::MAX), Holding::new("b", Decimal::MAX)],
            &[quote("a", 2, Some(10)), quote("b", 2, Some(10))],
        );
        assert_eq!(v.total_value, Decimal::MAX);
    }
}
