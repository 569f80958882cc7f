//! Markets sub-client — ranked pages, quotes by id, trending quotes.

use super::{quotes_from_wire, MarketQuery, Quote};
use crate::client::MarketboardClient;
use crate::error::SdkError;
use crate::shared::AssetId;

/// Page size of the trending quotes request.
const TRENDING_PER_PAGE: u32 = 50;

/// Sub-client for market quote operations. Never touches the snapshot cache;
/// use [`MarketboardClient::quote_cache`] for cached reads.
pub struct Markets<'a> {
    pub(crate) client: &'a MarketboardClient,
}

impl<'a> Markets<'a> {
    /// Run an arbitrary markets query.
    pub async fn fetch(&self, query: &MarketQuery) -> Result<Vec<Quote>, SdkError> {
        let rows = self.client.http.get_markets(query).await?;
        let quotes = quotes_from_wire(rows);
        tracing::debug!(
            page = query.page,
            ids = query.ids.len(),
            count = quotes.len(),
            "Fetched market quotes"
        );
        Ok(quotes)
    }

    /// The configured page of the ranked table.
    pub async fn list(&self) -> Result<Vec<Quote>, SdkError> {
        self.fetch(&self.client.market_query()).await
    }

    /// Another page of the ranked table (1-based).
    pub async fn page(&self, page: u32) -> Result<Vec<Quote>, SdkError> {
        self.fetch(&self.client.market_query().page(page)).await
    }

    /// Quotes for specific assets, ranked by market cap. No ids, no request.
    pub async fn by_ids(
        &self,
        ids: impl IntoIterator<Item = AssetId>,
    ) -> Result<Vec<Quote>, SdkError> {
        let query = MarketQuery::for_ids(ids).vs_currency(self.client.vs_currency());
        if query.ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch(&query).await
    }

    /// Quotes for the currently trending coins.
    pub async fn trending(&self) -> Result<Vec<Quote>, SdkError> {
        let trending = self.client.search().trending().await?;
        if trending.is_empty() {
            return Ok(Vec::new());
        }
        let query = MarketQuery::for_ids(trending.into_iter().map(|c| c.id))
            .vs_currency(self.client.vs_currency())
            .per_page(TRENDING_PER_PAGE);
        self.fetch(&query).await
    }
}
