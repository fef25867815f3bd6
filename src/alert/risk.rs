/// Level-to-risk classification.
///
/// An ordered threshold ladder evaluated high-to-low, first match wins:
///
///   level > high          → High   (above the tested containment ceiling)
///   low <= level <= high  → Medium (between the lowest flood and the ceiling)
///   level < low           → Low
///
/// Both bounds of the middle band are inclusive.

use serde::Serialize;

use crate::model::RiskTier;

/// Calibration points for the classifier, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskThresholds {
    low: f64,
    high: f64,
}

impl RiskThresholds {
    /// Returns `None` unless both bounds are finite and `low <= high`.
    pub fn new(low: f64, high: f64) -> Option<Self> {
        if low.is_finite() && high.is_finite() && low <= high {
            Some(Self { low, high })
        } else {
            None
        }
    }

    /// Lowest observed flooding level.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Tested containment ceiling.
    pub fn high(&self) -> f64 {
        self.high
    }
}

/// Pure, total classifier parameterized by `RiskThresholds`.
#[derive(Debug, Clone, Copy)]
pub struct RiskClassifier {
    thresholds: RiskThresholds,
}

impl RiskClassifier {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    pub fn classify(&self, level_m: f64) -> RiskTier {
        classify(level_m, &self.thresholds)
    }
}

/// Maps a level reading to a risk tier.
pub fn classify(level_m: f64, thresholds: &RiskThresholds) -> RiskTier {
    if level_m > thresholds.high {
        RiskTier::High
    } else if level_m >= thresholds.low {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
