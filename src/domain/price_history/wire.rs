//! Wire types for `/coins/{id}/market_chart` (REST).

use serde::{Deserialize, Serialize};

/// `[unix_millis, value]` pairs. Values may be null for gaps.
pub type ChartPairs = Vec<(f64, Option<f64>)>;

/// Historical chart response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: ChartPairs,
    #[serde(default)]
    pub market_caps: ChartPairs,
    #[serde(default)]
    pub total_volumes: ChartPairs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_chart_response_parses() {
        let json = r#"{
            "prices": [[1711843200000, 69702.3], [1711929600000, null]],
            "market_caps": [[1711843200000, 1370247487960.0]],
            "total_volumes": []
        }"#;
        let resp: MarketChartResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.prices.len(), 2);
        assert_eq!(resp.prices[0], (1711843200000.0, Some(69702.3)));
        assert_eq!(resp.prices[1].1, None);
        assert_eq!(resp.market_caps.len(), 1);
    }

    #[test]
    fn test_market_chart_response_missing_prices() {
        let resp: MarketChartResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.prices.is_empty());
    }
}
