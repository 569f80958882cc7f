//! Wire types for `/search`, `/search/trending` and `/coins/list` (REST).

use crate::shared::serde_util::lenient_f64;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendingItemResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub market_cap_rank: Option<f64>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoinResponse {
    pub item: TrendingItemResponse,
}

/// `/search/trending`. NFT and category sections are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingCoinResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCoinResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub market_cap_rank: Option<f64>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// `/search?query=`. Exchange, category and NFT hits are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<SearchCoinResponse>,
}

/// One element of `/coins/list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinListEntryResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trending_response_parses() {
        let json = r#"{
            "coins": [
                { "item": { "id": "pepe", "coin_id": 29850, "name": "Pepe", "symbol": "PEPE",
                            "market_cap_rank": 24, "thumb": "t.png", "score": 0 } }
            ],
            "nfts": [],
            "categories": []
        }"#;
        let resp: TrendingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.coins.len(), 1);
        assert_eq!(resp.coins[0].item.id.as_deref(), Some("pepe"));
        assert_eq!(resp.coins[0].item.score, Some(0.0));
    }

    #[test]
    fn test_search_response_parses() {
        let json = r#"{
            "coins": [{ "id": "bitcoin", "name": "Bitcoin", "api_symbol": "bitcoin",
                        "symbol": "BTC", "market_cap_rank": 1,
                        "thumb": "t.png", "large": "l.png" }],
            "exchanges": [{ "id": "binance" }]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.coins[0].symbol.as_deref(), Some("BTC"));
        assert_eq!(resp.coins[0].market_cap_rank, Some(1.0));
    }
}
