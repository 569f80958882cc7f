//! Price history domain — historical series and their chart geometry.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod projection;
pub mod wire;

use crate::error::SdkError;
use crate::shared::{AssetId, ChartRange};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;

pub use projection::{DetailChart, Insets, Projection, ProjectionMode, Sparkline};

/// One observation of an asset's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: DateTime<Utc>,
    pub price: Decimal,
}

/// Chronologically ordered price observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Build a series, stable-sorting by time so equal timestamps keep their
    /// arrival order.
    pub fn new(mut points: Vec<SeriesPoint>) -> Self {
        points.sort_by_key(|p| p.time);
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    pub fn prices(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Percentage move from the first to the last price.
    ///
    /// `None` for an empty series or when the first price is zero.
    pub fn change_percent(&self) -> Option<Decimal> {
        let first = self.first()?.price;
        let last = self.last()?.price;
        if first.is_zero() {
            return None;
        }
        last.checked_sub(first)?
            .checked_div(first)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

impl From<Vec<SeriesPoint>> for Series {
    fn from(points: Vec<SeriesPoint>) -> Self {
        Self::new(points)
    }
}

/// Source of historical series for the detail chart.
pub trait SeriesFetch {
    fn fetch_series(
        &self,
        id: &AssetId,
        range: ChartRange,
    ) -> impl Future<Output = Result<Series, SdkError>>;
}

impl<T: SeriesFetch + ?Sized> SeriesFetch for &T {
    fn fetch_series(
        &self,
        id: &AssetId,
        range: ChartRange,
    ) -> impl Future<Output = Result<Series, SdkError>> {
        (**self).fetch_series(id, range)
    }
}

impl<T: SeriesFetch + ?Sized> SeriesFetch for std::sync::Arc<T> {
    fn fetch_series(
        &self,
        id: &AssetId,
        range: ChartRange,
    ) -> impl Future<Output = Result<Series, SdkError>> {
        (**self).fetch_series(id, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64, price: i64) -> SeriesPoint {
        SeriesPoint {
            time: DateTime::<Utc>::from_timestamp_millis(ms).unwrap(),
            price: Decimal::from(price),
        }
    }

    #[test]
    fn test_series_sorted_by_time_stably() {
        let s = Series::new(vec![at(3, 30), at(1, 10), at(3, 31), at(2, 20)]);
        let prices: Vec<Decimal> = s.prices().collect();
        assert_eq!(
            prices,
            vec![10, 20, 30, 31].into_iter().map(Decimal::from).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_change_percent() {
        let s = Series::new(vec![at(1, 100), at(2, 90), at(3, 110)]);
        assert_eq!(s.change_percent(), Some(Decimal::from(10)));
        assert_eq!(Series::default().change_percent(), None);
        assert_eq!(Series::new(vec![at(1, 0), at(2, 5)]).change_percent(), None);
    }
}
