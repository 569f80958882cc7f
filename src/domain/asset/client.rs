//! Assets sub-client — single-coin detail.

use super::{asset_from_wire, AssetDetail};
use crate::client::MarketboardClient;
use crate::error::SdkError;
use crate::shared::AssetId;

/// Sub-client for single-asset operations.
pub struct Assets<'a> {
    pub(crate) client: &'a MarketboardClient,
}

impl<'a> Assets<'a> {
    /// Detail view of one coin. Unknown ids fail with `HttpError::NotFound`.
    pub async fn get(&self, id: &AssetId) -> Result<AssetDetail, SdkError> {
        if id.as_str().trim().is_empty() {
            return Err(SdkError::Validation("asset id is required".to_string()));
        }
        let resp = self.client.http.get_coin(id).await?;
        asset_from_wire(resp, self.client.vs_currency())
    }
}
