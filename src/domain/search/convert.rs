//! Conversion: search wire types → domain types. Entries without an id fail.

use super::wire::{
    CoinListEntryResponse, SearchCoinResponse, SearchResponse, TrendingItemResponse,
    TrendingResponse,
};
use super::{CoinListing, SearchHit, TrendingCoin};
use crate::error::SdkError;
use crate::shared::AssetId;

fn asset_id(id: Option<String>, what: &str) -> Result<AssetId, SdkError> {
    id.filter(|s| !s.trim().is_empty())
        .map(AssetId::new)
        .ok_or_else(|| SdkError::MalformedData(format!("{} without id", what)))
}

fn rank(value: Option<f64>) -> Option<u32> {
    value
        .filter(|r| *r >= 0.0 && *r <= u32::MAX as f64)
        .map(|r| r as u32)
}

impl TryFrom<SearchCoinResponse> for SearchHit {
    type Error = SdkError;

    fn try_from(source: SearchCoinResponse) -> Result<Self, Self::Error> {
        let id = asset_id(source.id, "search hit")?;
        Ok(SearchHit {
            name: source.name.unwrap_or_else(|| id.to_string()),
            symbol: source.symbol.unwrap_or_default(),
            market_cap_rank: rank(source.market_cap_rank).filter(|r| *r > 0),
            thumb: source.thumb.or(source.large),
            id,
        })
    }
}

impl TryFrom<TrendingItemResponse> for TrendingCoin {
    type Error = SdkError;

    fn try_from(source: TrendingItemResponse) -> Result<Self, Self::Error> {
        let id = asset_id(source.id, "trending coin")?;
        Ok(TrendingCoin {
            name: source.name.unwrap_or_else(|| id.to_string()),
            symbol: source.symbol.unwrap_or_default(),
            market_cap_rank: rank(source.market_cap_rank).filter(|r| *r > 0),
            thumb: source.thumb.or(source.large),
            score: rank(source.score),
            id,
        })
    }
}

impl TryFrom<CoinListEntryResponse> for CoinListing {
    type Error = SdkError;

    fn try_from(source: CoinListEntryResponse) -> Result<Self, Self::Error> {
        let id = asset_id(source.id, "coin list entry")?;
        Ok(CoinListing {
            name: source.name.unwrap_or_else(|| id.to_string()),
            symbol: source.symbol.unwrap_or_default(),
            id,
        })
    }
}

/// Convert rows, logging and skipping the ones that fail.
fn keep_valid<W, T>(rows: impl IntoIterator<Item = W>) -> Vec<T>
where
    T: TryFrom<W, Error = SdkError>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Skipping row: {}", e);
                None
            }
        })
        .collect()
}

pub fn search_hits_from_wire(resp: SearchResponse) -> Vec<SearchHit> {
    keep_valid(resp.coins)
}

/// Trending coins in the order the API ranks them.
pub fn trending_from_wire(resp: TrendingResponse) -> Vec<TrendingCoin> {
    keep_valid(resp.coins.into_iter().map(|c| c.item))
}

pub fn coin_list_from_wire(rows: Vec<CoinListEntryResponse>) -> Vec<CoinListing> {
    keep_valid(rows)
}
