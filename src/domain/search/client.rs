//! Search sub-client — free-text search, trending, coin directory.

use super::{coin_list_from_wire, search_hits_from_wire, trending_from_wire};
use super::{CoinListing, SearchHit, TrendingCoin};
use crate::client::MarketboardClient;
use crate::error::SdkError;

/// Sub-client for search operations.
pub struct Search<'a> {
    pub(crate) client: &'a MarketboardClient,
}

impl<'a> Search<'a> {
    /// Coins matching `query`. A blank query returns nothing without a request.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SdkError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let resp = self.client.http.search(query).await?;
        Ok(search_hits_from_wire(resp))
    }

    pub async fn trending(&self) -> Result<Vec<TrendingCoin>, SdkError> {
        let resp = self.client.http.get_trending().await?;
        Ok(trending_from_wire(resp))
    }

    /// The full coin directory (tens of thousands of entries).
    pub async fn coin_list(&self) -> Result<Vec<CoinListing>, SdkError> {
        let rows = self.client.http.get_coin_list().await?;
        let listings = coin_list_from_wire(rows);
        tracing::debug!(count = listings.len(), "Fetched coin list");
        Ok(listings)
    }
}
