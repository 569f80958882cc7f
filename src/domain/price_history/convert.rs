//! Conversion: MarketChartResponse → Series.

use super::wire::MarketChartResponse;
use super::{Series, SeriesPoint};
use crate::shared::decimal_from_f64;
use chrono::{DateTime, Utc};

impl From<MarketChartResponse> for Series {
    /// Pairs with a null, non-finite or out-of-range timestamp or price are
    /// skipped rather than failing the whole chart.
    fn from(source: MarketChartResponse) -> Self {
        let total = source.prices.len();
        let points: Vec<SeriesPoint> = source
            .prices
            .into_iter()
            .filter_map(|(t, price)| {
                if !t.is_finite() {
                    return None;
                }
                let time = DateTime::<Utc>::from_timestamp_millis(t as i64)?;
                let price = decimal_from_f64(price?)?;
                Some(SeriesPoint { time, price })
            })
            .collect();

        if points.len() < total {
            tracing::debug!(
                skipped = total - points.len(),
                "Skipped unusable chart points"
            );
        }
        Series::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_series_from_chart_skips_gaps_and_sorts() {
        let resp = MarketChartResponse {
            prices: vec![
                (2000.0, Some(2.0)),
                (1000.0, Some(1.0)),
                (1500.0, None),
                (f64::NAN, Some(9.0)),
                (3000.0, Some(f64::INFINITY)),
            ],
            ..Default::default()
        };
        let series = Series::from(resp);
        assert_eq!(series.len(), 2);
        assert_eq!(series.first().unwrap().price, Decimal::ONE);
        assert_eq!(series.last().unwrap().time.timestamp_millis(), 2000);
    }
}
