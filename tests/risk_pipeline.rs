/// Integration tests for the full refresh pipeline
///
/// Drives fetch → classify → merge through the public API with an
/// in-process transport, so no network access is needed:
/// 1. Live acquisition under both failure policies
/// 2. Risk classification against the catalog calibration
/// 3. Merged dataset shape handed to the presentation layer
///
/// Run with: cargo test --test risk_pipeline

use sillaro_sentinel::config::{FailurePolicy, RainfallWindow, SentinelConfig};
use sillaro_sentinel::engine::{RiskEngine, Snapshot};
use sillaro_sentinel::ingest::transport::Transport;
use sillaro_sentinel::model::{Category, RiskTier, SourceStatus, Upstream};
use sillaro_sentinel::report::render_report;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const HYDRO: &str = "http://hydro.invalid/lastdata";
const METEO: &str = "http://meteo.invalid/v1/forecast";

/// Answers the hydrometric and meteorological URLs with fixed results.
struct FixedTransport {
    level: Result<String, String>,
    forecast: Result<String, String>,
}

impl Transport for FixedTransport {
    fn get(&self, url: &str) -> Result<String, String> {
        if url.starts_with(HYDRO) {
            self.level.clone()
        } else if url.starts_with(METEO) {
            self.forecast.clone()
        } else {
            Err(format!("unexpected url {}", url))
        }
    }
}

fn level_json(level: f64) -> String {
    serde_json::json!({ "var": "B13215", "value": level }).to_string()
}

/// 24 hourly values of `first_day` followed by 24 of `second_day`.
fn forecast_json(first_day: f64, second_day: f64) -> String {
    let mut precipitation = vec![first_day; 24];
    precipitation.extend(vec![second_day; 24]);
    let time: Vec<String> = (0..48)
        .map(|h| format!("2025-12-{:02}T{:02}:00", 2 + h / 24, h % 24))
        .collect();
    serde_json::json!({
        "timezone": "GMT",
        "hourly": { "time": time, "precipitation": precipitation }
    })
    .to_string()
}

fn config(policy: FailurePolicy) -> SentinelConfig {
    SentinelConfig {
        hydro_endpoint: HYDRO.to_string(),
        meteo_endpoint: METEO.to_string(),
        failure_policy: policy,
        ..SentinelConfig::default()
    }
}

fn engine(
    policy: FailurePolicy,
    level: Result<String, String>,
    forecast: Result<String, String>,
) -> RiskEngine {
    RiskEngine::with_transport(&config(policy), Arc::new(FixedTransport { level, forecast }))
        .expect("engine should build from valid config")
}

// ---------------------------------------------------------------------------
// 1. End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn test_level_above_ceiling_is_high_with_six_rows() {
    let snapshot = engine(
        FailurePolicy::FailSoft,
        Ok(level_json(1.80)),
        Ok(forecast_json(2.0, 0.5)),
    )
    .refresh();

    let Snapshot::Ready { tier, reading, dataset } = snapshot else {
        panic!("healthy upstreams must produce a ready snapshot");
    };

    assert_eq!(tier, RiskTier::High);
    assert_eq!(reading.source_status, SourceStatus::Live);
    assert_eq!(reading.rainfall_24h_mm, Some(48.0), "first 24 values of 2.0 mm");
    assert_eq!(dataset.len(), 6);

    let current: Vec<_> = dataset
        .rows
        .iter()
        .filter(|r| r.category == Category::Current)
        .collect();
    assert_eq!(current.len(), 1, "exactly one live row");
    assert_eq!(current[0].level_m, Some(1.80));
}

#[test]
fn test_tiers_follow_live_level() {
    let cases = [
        (0.40, RiskTier::Low),
        (1.44, RiskTier::Low),
        (1.45, RiskTier::Medium),
        (1.60, RiskTier::Medium),
        (1.75, RiskTier::Medium),
        (1.76, RiskTier::High),
        (2.30, RiskTier::High),
    ];
    for (level, expected) in cases {
        let snapshot = engine(
            FailurePolicy::FailHard,
            Ok(level_json(level)),
            Ok(forecast_json(0.0, 0.0)),
        )
        .refresh();
        assert_eq!(snapshot.tier(), Some(expected), "level {} m", level);
    }
}

#[test]
fn test_historical_rows_precede_live_row() {
    let snapshot = engine(
        FailurePolicy::FailSoft,
        Ok(level_json(1.2)),
        Ok(forecast_json(1.0, 1.0)),
    )
    .refresh();
    let dataset = snapshot.dataset().expect("ready");

    let categories: Vec<Category> = dataset.rows.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Flooded,
            Category::Contained,
            Category::Flooded,
            Category::Flooded,
            Category::Flooded,
            Category::Current,
        ]
    );
}

// ---------------------------------------------------------------------------
// 2. Failure policies
// ---------------------------------------------------------------------------

#[test]
fn test_fail_soft_total_outage_uses_offline_calibration() {
    let snapshot = engine(
        FailurePolicy::FailSoft,
        Err("connection refused".to_string()),
        Err("connection refused".to_string()),
    )
    .refresh();

    assert!(snapshot.is_ready());
    let reading = snapshot.reading();
    assert_eq!(reading.source_status, SourceStatus::Fallback);
    assert_eq!(reading.level_m, Some(0.85));
    assert_eq!(reading.rainfall_24h_mm, Some(45.0));
    assert_eq!(snapshot.tier(), Some(RiskTier::Low));
}

#[test]
fn test_fail_hard_reports_hydrometric_failure_even_if_rain_fails() {
    let snapshot = engine(
        FailurePolicy::FailHard,
        Err("HTTP error: 503".to_string()),
        Err("HTTP error: 503".to_string()),
    )
    .refresh();

    match &snapshot {
        Snapshot::Unavailable { reading, error } => {
            assert_eq!(reading.source_status, SourceStatus::Unavailable);
            assert_eq!(error.upstream(), Upstream::Hydrometric);
            assert!(error.to_string().contains("503"));
        }
        other => panic!("expected unavailable, got {:?}", other),
    }
    assert!(render_report(&snapshot).contains("retry"));
}

#[test]
fn test_fail_hard_rain_failure_alone_is_reported() {
    let snapshot = engine(
        FailurePolicy::FailHard,
        Ok(level_json(1.1)),
        Ok(r#"{ "hourly": { "precipitation": ["x"] } }"#.to_string()),
    )
    .refresh();

    match snapshot {
        Snapshot::Unavailable { error, .. } => {
            assert_eq!(error.upstream(), Upstream::Meteorological);
            assert_eq!(error.kind(), "parse");
        }
        other => panic!("expected unavailable, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// 3. Rainfall window option
// ---------------------------------------------------------------------------

#[test]
fn test_trailing_window_can_be_selected() {
    let cfg = SentinelConfig {
        rainfall_window: RainfallWindow::Trailing,
        ..config(FailurePolicy::FailHard)
    };
    let transport = FixedTransport {
        level: Ok(level_json(1.0)),
        // Series stamped in 2025: every entry is in the past, so the
        // trailing window is the last 24 entries (second day).
        forecast: Ok(forecast_json(2.0, 0.5)),
    };
    let snapshot = RiskEngine::with_transport(&cfg, Arc::new(transport))
        .unwrap()
        .refresh();
    assert_eq!(snapshot.reading().rainfall_24h_mm, Some(12.0));
}
