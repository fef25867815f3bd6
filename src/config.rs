/// Engine configuration loader - parses sentinel.toml
///
/// Keeps endpoint URLs, the rain gauge location, calibration overrides and
/// the failure policy out of the code, so a deployment can switch to
/// fail-hard or point at a mirror without recompiling.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::alert::risk::RiskThresholds;
use crate::catalog::HistoricalCatalog;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "sentinel.toml";

const ARPAE_CSP_LEVEL_URL: &str =
    "https://simc.arpae.it/meteozen/rt_data/lastdata/-/1158841,4438103/simnbo/254,0,0/1,-,-,-/B13215";
const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

// ---------------------------------------------------------------------------
// Policy enums
// ---------------------------------------------------------------------------

/// What `fetch()` does when either upstream call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Substitute the fallback pair for both values; never error.
    FailSoft,
    /// Propagate a `FetchError`; the caller renders an unavailable state.
    FailHard,
}

/// Which 24 entries of the hourly precipitation series are summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainfallWindow {
    /// The first 24 entries: the series starts at the query window's start.
    Leading,
    /// The 24 entries ending at the current hour, located via `hourly.time`.
    Trailing,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Root of sentinel.toml. Every field is optional in the file; unknown
/// keys are rejected so a misspelled setting cannot silently fall back.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SentinelConfig {
    /// Hydrometric sensor URL returning `{ "value": <level m> }`.
    pub hydro_endpoint: String,
    /// Forecast API base URL; query parameters are appended.
    pub meteo_endpoint: String,
    /// WGS84 latitude of the rainfall point.
    pub lat: f64,
    /// WGS84 longitude of the rainfall point.
    pub lon: f64,

    /// Override for the lowest flood level; catalog value when absent.
    pub threshold_low: Option<f64>,
    /// Override for the containment ceiling; catalog value when absent.
    pub threshold_high: Option<f64>,

    /// Offline calibration level used under fail-soft (m).
    pub fallback_level: f64,
    /// Offline calibration rainfall used under fail-soft (mm).
    pub fallback_rainfall: f64,
    pub failure_policy: FailurePolicy,

    /// Per-request timeout. No timeout when absent.
    pub request_timeout_secs: Option<u64>,
    pub rainfall_window: RainfallWindow,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            hydro_endpoint: ARPAE_CSP_LEVEL_URL.to_string(),
            meteo_endpoint: OPEN_METEO_FORECAST_URL.to_string(),
            lat: 44.39,
            lon: 11.58,
            threshold_low: None,
            threshold_high: None,
            fallback_level: 0.85,
            fallback_rainfall: 45.0,
            failure_policy: FailurePolicy::FailSoft,
            request_timeout_secs: None,
            rainfall_window: RainfallWindow::Leading,
            log_filter: "sillaro_sentinel=info".to_string(),
        }
    }
}

/// Errors raised while building the engine from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("no risk thresholds: catalog cannot be calibrated and none are configured")]
    Uncalibrated,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl SentinelConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: SentinelConfig = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges and consistency of every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hydro_endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("hydro_endpoint must not be empty".into()));
        }
        if self.meteo_endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("meteo_endpoint must not be empty".into()));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ConfigError::Invalid(format!("lat {} out of range", self.lat)));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(ConfigError::Invalid(format!("lon {} out of range", self.lon)));
        }
        for (name, value) in [
            ("fallback_level", self.fallback_level),
            ("fallback_rainfall", self.fallback_rainfall),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1; omit it to disable the timeout".into(),
            ));
        }
        if let (Some(low), Some(high)) = (self.threshold_low, self.threshold_high) {
            if RiskThresholds::new(low, high).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "threshold_low {} must not exceed threshold_high {}",
                    low, high
                )));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Resolves the classifier thresholds: configured overrides win over
    /// the catalog's calibration points, one bound at a time.
    pub fn thresholds(&self, catalog: &HistoricalCatalog) -> Result<RiskThresholds, ConfigError> {
        let calibrated = catalog.calibration();
        let low = self
            .threshold_low
            .or(calibrated.map(|t| t.low()))
            .ok_or(ConfigError::Uncalibrated)?;
        let high = self
            .threshold_high
            .or(calibrated.map(|t| t.high()))
            .ok_or(ConfigError::Uncalibrated)?;

        RiskThresholds::new(low, high).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "resolved thresholds are inconsistent: low {} > high {}",
                low, high
            ))
        })
    }
}

/// Loads configuration from `path`.
///
/// A missing file is an error only when `required` is set; otherwise the
/// defaults are returned so the service runs out of the box.
pub fn load_config(path: &Path, required: bool) -> Result<SentinelConfig, ConfigError> {
    let path_str = path.display().to_string();

    match fs::read_to_string(path) {
        Ok(contents) => SentinelConfig::from_toml_str(&contents, &path_str),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            tracing::info!(path = %path_str, "no configuration file, using defaults");
            Ok(SentinelConfig::default())
        }
        Err(source) => Err(ConfigError::Io { path: path_str, source }),
    }
}
