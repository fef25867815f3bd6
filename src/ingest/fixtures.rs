/// Test fixtures: representative JSON payloads from the two upstreams.
///
/// ARPAE "lastdata" response shape (trimmed to what the parser reads):
///   { "value": 1.23, ... }
///
/// Open-Meteo forecast response shape with `hourly=precipitation&past_days=1`:
///   hourly.time[]          - "YYYY-MM-DDTHH:MM", GMT, oldest first
///   hourly.precipitation[] - mm per hour, same length as `time`,
///                            entries may be null for missing hours
///
/// With the default `forecast_days=7` the series holds 24 past hours
/// followed by 168 forecast hours, starting at yesterday 00:00.

use chrono::{Duration, NaiveDateTime};
use serde_json::json;

/// Sillaro at CSP reporting 1.80 m: above the December 2025 ceiling.
pub(crate) fn fixture_level_high_json() -> &'static str {
    r#"{
      "ident": "1158841,4438103",
      "network": "simnbo",
      "date": "2025-12-03T09:00:00",
      "var": "B13215",
      "value": 1.80
    }"#
}

/// Level reported as a numeric string, as some station feeds do.
pub(crate) fn fixture_level_string_json() -> &'static str {
    r#"{ "date": "2025-12-03T09:00:00", "var": "B13215", "value": "1.52" }"#
}

/// Sensor present but no measurement for the last slot.
pub(crate) fn fixture_level_null_json() -> &'static str {
    r#"{ "date": "2025-12-03T09:00:00", "var": "B13215", "value": null }"#
}

/// Small real-shaped forecast response: six hours only.
pub(crate) fn fixture_forecast_short_json() -> &'static str {
    r#"{
      "latitude": 44.38,
      "longitude": 11.58,
      "generationtime_ms": 0.04,
      "utc_offset_seconds": 0,
      "timezone": "GMT",
      "timezone_abbreviation": "GMT",
      "elevation": 44.0,
      "hourly_units": { "time": "iso8601", "precipitation": "mm" },
      "hourly": {
        "time": ["2025-12-02T00:00", "2025-12-02T01:00", "2025-12-02T02:00",
                 "2025-12-02T03:00", "2025-12-02T04:00", "2025-12-02T05:00"],
        "precipitation": [0.0, 1.2, 3.4, 0.0, 2.2, 0.1]
      }
    }"#
}

/// Builds a forecast response with one hourly entry per value, starting at
/// `start` ("YYYY-MM-DDTHH:MM").
pub(crate) fn forecast_json(start: &str, values: &[Option<f64>]) -> String {
    let start = NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M")
        .expect("fixture start must be a valid timestamp");
    let time: Vec<String> = (0..values.len())
        .map(|i| (start + Duration::hours(i as i64)).format("%Y-%m-%dT%H:%M").to_string())
        .collect();

    json!({
        "latitude": 44.38,
        "longitude": 11.58,
        "timezone": "GMT",
        "hourly_units": { "time": "iso8601", "precipitation": "mm" },
        "hourly": { "time": time, "precipitation": values }
    })
    .to_string()
}

/// 24 hours of 2.0 mm followed by 24 hours of 5.0 mm, from 2025-12-02 00:00.
pub(crate) fn fixture_forecast_two_days_json() -> String {
    let mut values = vec![Some(2.0); 24];
    values.extend(vec![Some(5.0); 24]);
    forecast_json("2025-12-02T00:00", &values)
}
