/// Core data types for the Sillaro flood risk engine.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O: historical events, the live reading snapshot, the
/// derived risk tier and merged rows, and the fetch error taxonomy.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Historical events
// ---------------------------------------------------------------------------

/// Outcome of a past high-water event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Tenuta: the banks held.
    Contained,
    /// Allagamento: flooding occurred.
    Flooded,
}

/// A past event with the rainfall and level observed at its peak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalEvent {
    pub label: &'static str,   // e.g. "Maggio 2023 I"
    pub rainfall_mm: f64,
    pub level_m: f64,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Live reading
// ---------------------------------------------------------------------------

/// Where the values of a `LiveReading` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    /// Both upstream calls succeeded.
    Live,
    /// At least one call failed and the offline calibration pair was substituted.
    Fallback,
    /// Acquisition failed and no values were synthesized.
    Unavailable,
}

/// The most recent level/rainfall snapshot. One per refresh cycle.
///
/// `level_m` and `rainfall_24h_mm` are `None` only when `source_status`
/// is `Unavailable`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveReading {
    pub level_m: Option<f64>,
    pub rainfall_24h_mm: Option<f64>,
    pub fetched_at: DateTime<Utc>,
    pub source_status: SourceStatus,
}

impl LiveReading {
    /// A reading built from two successful upstream calls.
    pub fn live(level_m: f64, rainfall_24h_mm: f64, fetched_at: DateTime<Utc>) -> Self {
        Self {
            level_m: Some(level_m),
            rainfall_24h_mm: Some(rainfall_24h_mm),
            fetched_at,
            source_status: SourceStatus::Live,
        }
    }

    /// A reading carrying the configured offline calibration pair.
    pub fn fallback(level_m: f64, rainfall_24h_mm: f64, fetched_at: DateTime<Utc>) -> Self {
        Self {
            level_m: Some(level_m),
            rainfall_24h_mm: Some(rainfall_24h_mm),
            fetched_at,
            source_status: SourceStatus::Fallback,
        }
    }

    /// A reading with no values, for a failed fail-hard cycle.
    pub fn unavailable(fetched_at: DateTime<Utc>) -> Self {
        Self {
            level_m: None,
            rainfall_24h_mm: None,
            fetched_at,
            source_status: SourceStatus::Unavailable,
        }
    }
}

// ---------------------------------------------------------------------------
// Risk tiers
// ---------------------------------------------------------------------------

/// Discrete flood risk derived from the live level, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// How a presentation layer should style the risk banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerStyle {
    Success,
    Warning,
    Error,
}

impl RiskTier {
    /// One-line banner text shown above the metrics.
    pub fn headline(&self) -> &'static str {
        match self {
            RiskTier::High => "HIGH RISK: level exceeds the December 2025 containment ceiling",
            RiskTier::Medium => "MEDIUM RISK: level inside the containment test band (December 2025 scenario)",
            RiskTier::Low => "LOW RISK: ordinary conditions",
        }
    }

    pub fn banner_style(&self) -> BannerStyle {
        match self {
            RiskTier::High => BannerStyle::Error,
            RiskTier::Medium => BannerStyle::Warning,
            RiskTier::Low => BannerStyle::Success,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            RiskTier::High => "🔴",
            RiskTier::Medium => "🟡",
            RiskTier::Low => "🟢",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

// ---------------------------------------------------------------------------
// Merged dataset
// ---------------------------------------------------------------------------

/// Color/grouping tag for a merged row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Flooded,
    Contained,
    Current,
}

impl Category {
    /// Chart color for points of this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Flooded => "red",
            Category::Contained => "green",
            Category::Current => "black",
        }
    }
}

impl From<Outcome> for Category {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Contained => Category::Contained,
            Outcome::Flooded => Category::Flooded,
        }
    }
}

/// One point of the rainfall/level comparison.
///
/// Coordinates are `None` only for the live row of an unavailable reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRow {
    pub label: String,
    pub rainfall_mm: Option<f64>,
    pub level_m: Option<f64>,
    pub category: Category,
    pub color: &'static str,
    pub marker_size: u8,
}

/// Historical events plus the live point, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedDataset {
    pub rows: Vec<MergedRow>,
}

impl MergedDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row tagged `Current`, if present.
    pub fn current(&self) -> Option<&MergedRow> {
        self.rows.iter().find(|r| r.category == Category::Current)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// The two independent data providers behind a live reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Upstream {
    /// ARPAE hydrometric sensor (river level).
    Hydrometric,
    /// Open-Meteo hourly precipitation.
    Meteorological,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::Hydrometric => write!(f, "hydrometric"),
            Upstream::Meteorological => write!(f, "meteorological"),
        }
    }
}

/// Errors that can arise while acquiring a live reading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Transport-level failure: unreachable host, timeout, non-2xx status.
    #[error("{upstream} endpoint unreachable: {message}")]
    Network { upstream: Upstream, message: String },
    /// Body is not JSON or lacks the expected field shape.
    #[error("{upstream} response malformed: {message}")]
    MalformedResponse { upstream: Upstream, message: String },
    /// Field present but not coercible to a usable number.
    #[error("{upstream} value not usable: {message}")]
    Parse { upstream: Upstream, message: String },
}

impl FetchError {
    pub fn upstream(&self) -> Upstream {
        match self {
            FetchError::Network { upstream, .. }
            | FetchError::MalformedResponse { upstream, .. }
            | FetchError::Parse { upstream, .. } => *upstream,
        }
    }

    /// Short machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network",
            FetchError::MalformedResponse { .. } => "malformed_response",
            FetchError::Parse { .. } => "parse",
        }
    }
}
