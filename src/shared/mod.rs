//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the API sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod serde_util;
pub mod trend;

pub use trend::Trend;

use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Newtype for asset identifiers (CoinGecko coin ids, e.g. `"bitcoin"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId(s))
    }
}

// ─── ChartRange ──────────────────────────────────────────────────────────────

/// Time window of a historical price series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[default]
    #[serde(rename = "24h")]
    Day1,
    #[serde(rename = "7d")]
    Day7,
    #[serde(rename = "30d")]
    Day30,
    #[serde(rename = "90d")]
    Day90,
    #[serde(rename = "1y")]
    Year1,
}

impl ChartRange {
    pub const ALL: [ChartRange; 5] = [
        ChartRange::Day1,
        ChartRange::Day7,
        ChartRange::Day30,
        ChartRange::Day90,
        ChartRange::Year1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "24h",
            Self::Day7 => "7d",
            Self::Day30 => "30d",
            Self::Day90 => "90d",
            Self::Year1 => "1y",
        }
    }

    /// Window length in days.
    pub fn days(&self) -> u32 {
        match self {
            Self::Day1 => 1,
            Self::Day7 => 7,
            Self::Day30 => 30,
            Self::Day90 => 90,
            Self::Year1 => 365,
        }
    }

    /// Sampling interval requested from the API.
    pub fn interval(&self) -> &'static str {
        if self.days() <= 1 {
            "hourly"
        } else {
            "daily"
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.days() == days)
    }
}

impl std::fmt::Display for ChartRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Decimal boundary ────────────────────────────────────────────────────────

/// Convert a wire `f64` into a `Decimal`.
///
/// Returns `None` for NaN, infinities and magnitudes `Decimal` cannot hold.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Same as [`decimal_from_f64`] for optional wire fields.
pub fn opt_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(decimal_from_f64)
}

/// Parse user or stored text into a `Decimal`.
///
/// Accepts plain and scientific notation, surrounding whitespace is ignored.
/// Returns `None` for anything that is not a number.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
        .or_else(|| trimmed.parse::<f64>().ok().and_then(decimal_from_f64))
}

/// Lossy `Decimal` → `f64` for geometry; unrepresentable values map to 0.
pub fn to_f64(value: &Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
