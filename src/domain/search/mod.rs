//! Search domain — free-text coin search, trending coins, the coin directory.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::error::SdkError;
use crate::shared::AssetId;
use serde::{Deserialize, Serialize};
use std::future::Future;

pub use convert::{coin_list_from_wire, search_hits_from_wire, trending_from_wire};

/// One coin from `/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: Option<String>,
}

/// One coin from `/search/trending`, in trending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: Option<String>,
    pub score: Option<u32>,
}

/// Entry of the full coin directory, used by the holdings picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinListing {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
}

impl CoinListing {
    /// `"Bitcoin (BTC)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }
}

/// Picker suggestions: directory entries whose name or symbol contains the
/// trimmed, case-insensitive `query`, in directory order, at most `limit`.
///
/// An empty query suggests nothing.
pub fn suggest<'a>(listings: &'a [CoinListing], query: &str, limit: usize) -> Vec<&'a CoinListing> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    listings
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle) || c.symbol.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect()
}

/// Picker suggestion count.
pub const SUGGESTION_LIMIT: usize = 10;

/// Source of the coin directory.
pub trait CoinListFetch {
    fn fetch_coin_list(&self) -> impl Future<Output = Result<Vec<CoinListing>, SdkError>>;
}

impl<T: CoinListFetch + ?Sized> CoinListFetch for &T {
    fn fetch_coin_list(&self) -> impl Future<Output = Result<Vec<CoinListing>, SdkError>> {
        (**self).fetch_coin_list()
    }
}

impl<T: CoinListFetch + ?Sized> CoinListFetch for std::sync::Arc<T> {
    fn fetch_coin_list(&self) -> impl Future<Output = Result<Vec<CoinListing>, SdkError>> {
        (**self).fetch_coin_list()
    }
}
