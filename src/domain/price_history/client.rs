//! Price history sub-client — historical series for the detail chart.

use super::Series;
use crate::client::MarketboardClient;
use crate::error::SdkError;
use crate::shared::{AssetId, ChartRange};

/// Sub-client for price history operations.
pub struct PriceHistory<'a> {
    pub(crate) client: &'a MarketboardClient,
}

impl<'a> PriceHistory<'a> {
    /// Price series of `id` over `range`, in the client's quote currency.
    pub async fn get(&self, id: &AssetId, range: ChartRange) -> Result<Series, SdkError> {
        let resp = self
            .client
            .http
            .get_market_chart(id, self.client.vs_currency(), range)
            .await?;
        Ok(Series::from(resp))
    }
}
