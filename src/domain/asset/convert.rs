//! Conversion: CoinDetailResponse → AssetDetail.

use super::wire::{CoinDetailResponse, CurrencyAmount, MarketDataResponse};
use super::{AssetDetail, MarketData};
use crate::error::SdkError;
use crate::shared::{opt_decimal, AssetId};
use rust_decimal::Decimal;

fn amount(value: &Option<CurrencyAmount>, currency: &str) -> Option<Decimal> {
    opt_decimal(value.as_ref().and_then(|a| a.get(currency)))
}

fn market_data(source: &MarketDataResponse, currency: &str) -> MarketData {
    // Prefer the figure in the requested currency, fall back to the USD-based one.
    let change = |in_currency: &Option<CurrencyAmount>, plain: Option<f64>| {
        amount(in_currency, currency).or_else(|| opt_decimal(plain))
    };

    MarketData {
        current_price: amount(&source.current_price, currency)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO),
        market_cap: amount(&source.market_cap, currency),
        total_volume: amount(&source.total_volume, currency),
        high_24h: amount(&source.high_24h, currency),
        low_24h: amount(&source.low_24h, currency),
        price_change_percentage_24h: change(
            &source.price_change_percentage_24h_in_currency,
            source.price_change_percentage_24h,
        ),
        price_change_percentage_7d: change(
            &source.price_change_percentage_7d_in_currency,
            source.price_change_percentage_7d,
        ),
        price_change_percentage_30d: change(
            &source.price_change_percentage_30d_in_currency,
            source.price_change_percentage_30d,
        ),
        circulating_supply: opt_decimal(source.circulating_supply),
        total_supply: opt_decimal(source.total_supply),
        max_supply: opt_decimal(source.max_supply),
        ath: amount(&source.ath, currency),
        atl: amount(&source.atl, currency),
        last_updated: source.last_updated,
    }
}

/// Validate a detail response and pick out `vs_currency` figures.
///
/// Missing id or missing market data is [`SdkError::MalformedData`].
pub fn asset_from_wire(
    source: CoinDetailResponse,
    vs_currency: &str,
) -> Result<AssetDetail, SdkError> {
    let id = match source.id {
        Some(id) if !id.trim().is_empty() => AssetId::new(id),
        _ => {
            return Err(SdkError::MalformedData(
                "coin detail without id".to_string(),
            ))
        }
    };
    let Some(md) = source.market_data.as_ref() else {
        return Err(SdkError::MalformedData(format!(
            "market data not available for {}",
            id
        )));
    };
    let currency = vs_currency.to_lowercase();

    let description = source
        .description
        .as_ref()
        .and_then(|d| d.get("en").cloned().flatten())
        .filter(|s| !s.trim().is_empty());
    let homepage = source
        .links
        .as_ref()
        .and_then(|l| l.homepage.iter().flatten().find(|s| !s.is_empty()).cloned());
    let image = source
        .image
        .as_ref()
        .and_then(|i| i.large.clone().or_else(|| i.small.clone()).or_else(|| i.thumb.clone()));

    Ok(AssetDetail {
        symbol: source.symbol.clone().unwrap_or_default(),
        name: source.name.clone().unwrap_or_else(|| id.to_string()),
        description,
        homepage,
        image,
        market_cap_rank: source
            .market_cap_rank
            .filter(|r| *r >= 1.0 && *r <= u32::MAX as f64)
            .map(|r| r as u32),
        market_data: market_data(md, &currency),
        vs_currency: currency,
        id,
    })
}
