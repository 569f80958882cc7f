//! Conversion: MarketCoinResponse → Quote (TryFrom + validation).

use super::wire::MarketCoinResponse;
use super::Quote;
use crate::error::SdkError;
use crate::shared::{decimal_from_f64, opt_decimal, AssetId};
use rust_decimal::Decimal;

impl TryFrom<MarketCoinResponse> for Quote {
    type Error = SdkError;

    fn try_from(source: MarketCoinResponse) -> Result<Self, Self::Error> {
        let id = match source.id {
            Some(id) if !id.trim().is_empty() => AssetId::new(id),
            _ => return Err(SdkError::MalformedData("market row without id".to_string())),
        };

        // A null price keeps the row listed at 0.
        let current_price = opt_decimal(source.current_price)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO);

        let market_cap_rank = source
            .market_cap_rank
            .filter(|r| *r >= 1.0 && *r <= u32::MAX as f64)
            .map(|r| r as u32);

        let sparkline = source
            .sparkline_in_7d
            .map(|s| {
                s.price
                    .into_iter()
                    .flatten()
                    .filter_map(decimal_from_f64)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Quote {
            symbol: source.symbol.unwrap_or_default(),
            name: source.name.unwrap_or_else(|| id.to_string()),
            id,
            image: source.image.filter(|s| !s.is_empty()),
            current_price,
            market_cap_rank,
            price_change_percentage_24h: opt_decimal(
                source
                    .price_change_percentage_24h
                    .or(source.price_change_percentage_24h_in_currency),
            ),
            price_change_percentage_7d: opt_decimal(source.price_change_percentage_7d_in_currency),
            price_change_percentage_30d: opt_decimal(
                source.price_change_percentage_30d_in_currency,
            ),
            market_cap: opt_decimal(source.market_cap),
            total_volume: opt_decimal(source.total_volume),
            circulating_supply: opt_decimal(source.circulating_supply),
            total_supply: opt_decimal(source.total_supply),
            max_supply: opt_decimal(source.max_supply),
            ath: opt_decimal(source.ath),
            atl: opt_decimal(source.atl),
            high_24h: opt_decimal(source.high_24h),
            low_24h: opt_decimal(source.low_24h),
            last_updated: source.last_updated,
            sparkline,
        })
    }
}

/// Convert a whole `/coins/markets` page, dropping rows that fail validation.
pub fn quotes_from_wire(rows: Vec<MarketCoinResponse>) -> Vec<Quote> {
    rows.into_iter()
        .filter_map(|row| match Quote::try_from(row) {
            Ok(quote) => Some(quote),
            Err(e) => {
                tracing::warn!("Dropping market row: {}", e);
                None
            }
        })
        .collect()
}
