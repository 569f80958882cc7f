//! Series → chart geometry.
//!
//! Maps prices onto a `width × height` box with the Y axis inverted (higher
//! price, smaller `y`). Everything here is pure: same input, same geometry.
//!
//! ```text
//! x = left + i / (n - 1) * plot_w
//! y = top + plot_h - (price - lo) / span * plot_h
//! ```
//!
//! `lo`/`span` are the raw price range for sparklines and the range widened
//! by 10 % on both ends for detail charts.

use super::{Series, SeriesPoint};
use crate::shared::{decimal_from_f64, to_f64, Trend};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertical headroom added to each end of a detail chart's price range.
pub const DETAIL_RANGE_PADDING: f64 = 0.1;

/// Number of intervals between detail chart gridlines (one more rule than this).
pub const GRID_INTERVALS: usize = 5;

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Anything with a price, optionally timestamped.
pub trait PricePoint {
    fn price(&self) -> Decimal;

    fn time(&self) -> Option<DateTime<Utc>> {
        None
    }
}

impl PricePoint for Decimal {
    fn price(&self) -> Decimal {
        *self
    }
}

impl PricePoint for SeriesPoint {
    fn price(&self) -> Decimal {
        self.price
    }

    fn time(&self) -> Option<DateTime<Utc>> {
        Some(self.time)
    }
}

/// Space reserved around the plot area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(padding: f64) -> Self {
        Self::new(padding, padding, padding, padding)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Raw range, polyline only.
    Sparkline,
    /// Padded range, polyline plus fill area and gridlines.
    Detail,
}

// ─── Outputs ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub price: Decimal,
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// Ordered drawing commands. `Display` renders SVG path data (`M x y L x y … Z`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn polyline(points: &[ProjectedPoint]) -> Self {
        let commands = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if i == 0 {
                    PathCommand::MoveTo(p.x, p.y)
                } else {
                    PathCommand::LineTo(p.x, p.y)
                }
            })
            .collect();
        Self { commands }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(x, y) => write!(f, "M {} {}", x, y)?,
                PathCommand::LineTo(x, y) => write!(f, "L {} {}", x, y)?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Horizontal rule with the price it marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub y: f64,
    pub price: Decimal,
}

/// Price ↔ y mapping of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Scale {
    lo: f64,
    span: f64,
    top: f64,
    plot_h: f64,
}

impl Scale {
    fn price_to_y(&self, price: f64) -> f64 {
        self.top + self.plot_h - (price - self.lo) / self.span * self.plot_h
    }

    fn y_to_price(&self, y: f64) -> Option<f64> {
        if self.plot_h <= 0.0 {
            return None;
        }
        Some(self.lo + (self.top + self.plot_h - y) / self.plot_h * self.span)
    }
}

/// Renderable geometry for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub mode: ProjectionMode,
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
    pub points: Vec<ProjectedPoint>,
    pub line: Path,
    /// Detail mode: polyline closed down to the baseline.
    pub area: Option<Path>,
    /// Detail mode: rules from the top edge to the baseline.
    pub grid: Vec<GridLine>,
    scale: Option<Scale>,
}

impl Projection {
    fn empty(mode: ProjectionMode, width: f64, height: f64, insets: Insets) -> Self {
        Self {
            mode,
            width,
            height,
            insets,
            points: Vec::new(),
            line: Path::default(),
            area: None,
            grid: Vec::new(),
            scale: None,
        }
    }

    /// No points: the caller shows a placeholder instead of a chart.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<&ProjectedPoint> {
        self.points.last()
    }

    /// `y` of the plot area's bottom edge.
    pub fn baseline(&self) -> f64 {
        self.height - self.insets.bottom
    }

    /// Inverse mapping: the price a given `y` stands for.
    ///
    /// `None` without a scale (fewer than two points) or with a zero-height plot.
    pub fn price_at(&self, y: f64) -> Option<Decimal> {
        let scale = self.scale?;
        decimal_from_f64(scale.y_to_price(y)?)
    }

    /// Forward mapping for arbitrary prices (e.g. a cost-basis marker).
    pub fn y_for_price(&self, price: Decimal) -> Option<f64> {
        self.scale.map(|s| s.price_to_y(to_f64(&price)))
    }
}

// ─── Projector ───────────────────────────────────────────────────────────────

/// Project `points` into a `width × height` box.
///
/// - empty input → empty projection;
/// - one point → a single point at the centre of the box;
/// - a flat series uses a unit range, so every point shares one `y`.
pub fn project<P: PricePoint>(
    points: &[P],
    width: f64,
    height: f64,
    insets: Insets,
    mode: ProjectionMode,
) -> Projection {
    let mut projection = Projection::empty(mode, width, height, insets);

    match points {
        [] => return projection,
        [only] => {
            let point = ProjectedPoint {
                x: width / 2.0,
                y: height / 2.0,
                price: only.price(),
                time: only.time(),
            };
            projection.line = Path::polyline(std::slice::from_ref(&point));
            projection.points.push(point);
            return projection;
        }
        _ => {}
    }

    let prices: Vec<f64> = points.iter().map(|p| to_f64(&p.price())).collect();
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut range = max - min;
    if range == 0.0 || !range.is_finite() {
        range = 1.0;
    }

    let (lo, span) = match mode {
        ProjectionMode::Sparkline => (min, range),
        ProjectionMode::Detail => {
            let pad = range * DETAIL_RANGE_PADDING;
            (min - pad, range + pad * 2.0)
        }
    };

    let plot_w = (width - insets.left - insets.right).max(0.0);
    let plot_h = (height - insets.top - insets.bottom).max(0.0);
    let scale = Scale {
        lo,
        span,
        top: insets.top,
        plot_h,
    };

    let last_index = (points.len() - 1) as f64;
    projection.points = points
        .iter()
        .zip(&prices)
        .enumerate()
        .map(|(i, (p, price))| ProjectedPoint {
            x: insets.left + (i as f64 / last_index) * plot_w,
            y: scale.price_to_y(*price),
            price: p.price(),
            time: p.time(),
        })
        .collect();
    projection.line = Path::polyline(&projection.points);
    projection.scale = Some(scale);

    if mode == ProjectionMode::Detail {
        let baseline = projection.baseline();
        let mut area = projection.line.clone();
        if let Some(last) = projection.points.last() {
            area.commands.push(PathCommand::LineTo(last.x, baseline));
        }
        area.commands.push(PathCommand::LineTo(insets.left, baseline));
        area.commands.push(PathCommand::Close);
        projection.area = Some(area);

        projection.grid = (0..=GRID_INTERVALS)
            .map(|i| {
                let y = insets.top + (i as f64 / GRID_INTERVALS as f64) * plot_h;
                let price = scale
                    .y_to_price(y)
                    .and_then(decimal_from_f64)
                    .unwrap_or(Decimal::ZERO);
                GridLine { y, price }
            })
            .collect();
    }

    projection
}

// ─── Presets ─────────────────────────────────────────────────────────────────

/// Inline 7-day trend line of a market row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    pub projection: Projection,
    pub trend: Trend,
}

impl Sparkline {
    pub const WIDTH: f64 = 100.0;
    pub const HEIGHT: f64 = 30.0;
    pub const PADDING: f64 = 2.0;

    /// `None` for an empty series. Colour follows `change_pct` (usually the 7d
    /// change), not the drawn slope.
    pub fn render(prices: &[Decimal], change_pct: Option<Decimal>) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }
        Some(Self {
            projection: project(
                prices,
                Self::WIDTH,
                Self::HEIGHT,
                Insets::uniform(Self::PADDING),
                ProjectionMode::Sparkline,
            ),
            trend: Trend::classify(change_pct),
        })
    }

    /// SVG path data of the line.
    pub fn path_data(&self) -> String {
        self.projection.line.to_string()
    }
}

/// Full-size chart of the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailChart {
    pub projection: Projection,
    pub trend: Trend,
    pub last_price: Decimal,
    /// Move over the charted window; `None` when the first price is zero.
    pub change_percent: Option<Decimal>,
}

impl DetailChart {
    pub const MIN_WIDTH: f64 = 600.0;
    pub const HEIGHT: f64 = 400.0;
    pub const INSETS: Insets = Insets {
        top: 20.0,
        right: 40.0,
        bottom: 40.0,
        left: 60.0,
    };

    /// `None` for an empty series. `width` is the available width; the chart
    /// never goes below [`Self::MIN_WIDTH`].
    pub fn render(series: &Series, width: f64) -> Option<Self> {
        let first = series.first()?.price;
        let last = series.last()?.price;
        let width = if width.is_finite() {
            width.max(Self::MIN_WIDTH)
        } else {
            Self::MIN_WIDTH
        };

        Some(Self {
            projection: project(
                series.points(),
                width,
                Self::HEIGHT,
                Self::INSETS,
                ProjectionMode::Detail,
            ),
            trend: Trend::classify(last.checked_sub(first)),
            last_price: last,
            change_percent: series.change_percent(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn prices(values: &[i64]) -> Vec<Decimal> {
        values.iter().copied().map(dec).collect()
    }

    fn series(values: &[i64]) -> Series {
        Series::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| SeriesPoint {
                    time: DateTime::<Utc>::from_timestamp_millis(i as i64 * 3_600_000).unwrap(),
                    price: dec(*v),
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_series_has_no_points() {
        let p = project::<Decimal>(
            &[],
            100.0,
            30.0,
            Insets::uniform(2.0),
            ProjectionMode::Sparkline,
        );
        assert!(p.is_empty());
        assert!(p.line.is_empty());
        assert!(Sparkline::render(&[], None).is_none());
        assert!(DetailChart::render(&Series::default(), 800.0).is_none());
    }

    #[test]
    fn test_single_point_is_centred() {
        let p = project(
            &prices(&[42]),
            100.0,
            30.0,
            Insets::uniform(2.0),
            ProjectionMode::Sparkline,
        );
        assert_eq!(p.points.len(), 1);
        assert_eq!(p.points[0].x, 50.0);
        assert_eq!(p.points[0].y, 15.0);
        assert_eq!(p.price_at(10.0), None);
    }

    #[test]
    fn test_flat_series_shares_one_y() {
        for mode in [ProjectionMode::Sparkline, ProjectionMode::Detail] {
            let p = project(&prices(&[5, 5, 5]), 100.0, 30.0, Insets::uniform(2.0), mode);
            assert_eq!(p.points.len(), 3);
            assert!(p.points.iter().all(|pt| pt.y == p.points[0].y));
        }
    }

    #[test]
    fn test_sparkline_extremes_touch_padding() {
        let p = project(
            &prices(&[10, 20, 15]),
            100.0,
            30.0,
            Insets::uniform(2.0),
            ProjectionMode::Sparkline,
        );
        assert_eq!(p.points[0].x, 2.0);
        assert_eq!(p.points[2].x, 98.0);
        assert_eq!(p.points[0].y, 28.0);
        assert_eq!(p.points[1].y, 2.0);
        assert_eq!(p.points[2].y, 15.0);
        assert_eq!(p.line.to_string(), "M 2 28 L 50 2 L 98 15");
        assert!(p.area.is_none());
        assert!(p.grid.is_empty());
    }

    #[test]
    fn test_detail_points_stay_inside_plot() {
        let chart = DetailChart::render(&series(&[100, 180, 90, 140, 200, 120]), 800.0).unwrap();
        let p = &chart.projection;
        let i = DetailChart::INSETS;
        assert_eq!(p.points.len(), 6);
        for pt in &p.points {
            assert!(pt.x >= i.left && pt.x <= p.width - i.right);
            assert!(pt.y >= i.top && pt.y <= p.height - i.bottom);
            assert!(pt.time.is_some());
        }
        // 10% headroom: extremes sit strictly inside the plot.
        let max_y = p.points.iter().map(|pt| pt.y).fold(f64::MIN, f64::max);
        assert!(max_y < p.baseline());
    }

    #[test]
    fn test_detail_area_closes_on_baseline() {
        let chart = DetailChart::render(&series(&[1, 2, 3]), 100.0).unwrap();
        let p = &chart.projection;
        assert_eq!(p.width, DetailChart::MIN_WIDTH);
        let area = p.area.as_ref().unwrap();
        let n = area.commands.len();
        assert_eq!(area.commands[n - 1], PathCommand::Close);
        assert_eq!(area.commands[n - 2], PathCommand::LineTo(60.0, 360.0));
        assert_eq!(area.commands[n - 3], PathCommand::LineTo(560.0, 360.0));
        assert!(area.to_string().ends_with("L 560 360 L 60 360 Z"));
    }

    #[test]
    fn test_detail_gridlines_label_by_inverse_mapping() {
        // range 100 → padded to [90, 210], span 120.
        let chart = DetailChart::render(&series(&[100, 200]), 600.0).unwrap();
        let grid = &chart.projection.grid;
        assert_eq!(grid.len(), GRID_INTERVALS + 1);
        assert_eq!(grid[0].y, 20.0);
        assert_eq!(grid[GRID_INTERVALS].y, 360.0);
        assert_eq!(grid[0].price.round_dp(6), dec(210));
        assert_eq!(grid[GRID_INTERVALS].price.round_dp(6), dec(90));
        assert_eq!(grid[1].price.round_dp(6), dec(186));

        for pt in &chart.projection.points {
            let back = chart.projection.price_at(pt.y).unwrap();
            assert_eq!(back.round_dp(6), pt.price);
        }
    }

    #[test]
    fn test_detail_chart_summary() {
        let chart = DetailChart::render(&series(&[200, 150]), 900.0).unwrap();
        assert_eq!(chart.trend, Trend::Negative);
        assert_eq!(chart.last_price, dec(150));
        assert_eq!(chart.change_percent, Some(dec(-25)));
        assert_eq!(chart.projection.width, 900.0);

        let from_zero = DetailChart::render(&series(&[0, 5]), 600.0).unwrap();
        assert_eq!(from_zero.change_percent, None);
        assert_eq!(from_zero.trend, Trend::Positive);
    }

    #[test]
    fn test_sparkline_trend_follows_supplied_change() {
        let up_line_down_badge = Sparkline::render(&prices(&[1, 2, 3]), Some(dec(-1))).unwrap();
        assert_eq!(up_line_down_badge.trend, Trend::Negative);
        let missing = Sparkline::render(&prices(&[3, 2]), None).unwrap();
        assert_eq!(missing.trend, Trend::Positive);
        assert!(missing.path_data().starts_with("M 2 2"));
    }
}
