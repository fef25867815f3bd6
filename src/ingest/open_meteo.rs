/// Open-Meteo forecast API client.
///
/// Handles URL construction and JSON parsing for the hourly precipitation
/// series, and reduces that series to a 24-hour rainfall total:
///   https://api.open-meteo.com/v1/forecast
///
/// Requesting `past_days=1` makes the series start at yesterday 00:00 GMT,
/// oldest first. See `fixtures.rs` for annotated payloads.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde_json::Value;

use crate::config::RainfallWindow;
use crate::ingest::transport::Transport;
use crate::model::{FetchError, Upstream};

const UPSTREAM: Upstream = Upstream::Meteorological;

/// Number of hourly entries summed into the rainfall total.
pub const WINDOW_HOURS: usize = 24;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Hourly series as returned by the API. `precipitation[i]` is `None` where
/// the provider reported `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPrecipitation {
    pub time: Vec<String>,
    pub precipitation: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the forecast URL for the past day plus present of hourly
/// precipitation at `lat`/`lon`.
///
/// # Example
/// ```
/// use sillaro_sentinel::ingest::open_meteo::build_forecast_url;
///
/// let url = build_forecast_url("https://api.open-meteo.com/v1/forecast", 44.39, 11.58);
/// assert!(url.ends_with("latitude=44.39&longitude=11.58&hourly=precipitation&past_days=1"));
/// ```
pub fn build_forecast_url(base: &str, lat: f64, lon: f64) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!(
        "{}{}latitude={}&longitude={}&hourly=precipitation&past_days=1",
        base, separator, lat, lon
    )
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// GETs the forecast URL and reduces it to a 24 h total (mm, 1 decimal).
pub fn fetch_rainfall(
    transport: &dyn Transport,
    url: &str,
    window: RainfallWindow,
    now: DateTime<Utc>,
) -> Result<f64, FetchError> {
    let body = transport.get(url).map_err(|message| FetchError::Network {
        upstream: UPSTREAM,
        message,
    })?;
    let series = parse_forecast_response(&body)?;
    rainfall_24h(&series, window, now)
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses `hourly.time` and `hourly.precipitation` out of a response body.
///
/// `hourly.time` is optional here; it is only required by the trailing
/// window.
///
/// # Errors
/// - `MalformedResponse` - not JSON, `hourly.precipitation` missing or not an
///   array, empty series, or `time` present but not an array of strings.
/// - `Parse` - a precipitation entry is neither a number nor `null`.
pub fn parse_forecast_response(json: &str) -> Result<HourlyPrecipitation, FetchError> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| malformed(format!("JSON deserialization failed: {}", e)))?;

    let hourly = document
        .get("hourly")
        .ok_or_else(|| malformed("missing `hourly` object".to_string()))?;

    let raw_values = hourly
        .get("precipitation")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing `hourly.precipitation` array".to_string()))?;

    if raw_values.is_empty() {
        return Err(malformed("`hourly.precipitation` is empty".to_string()));
    }

    let precipitation = raw_values
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| parse_error(format!("hour {}: {} is not representable as f64", i, n))),
            other => Err(parse_error(format!("hour {}: unusable precipitation {}", i, other))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let time = match hourly.get("time") {
        None => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|t| {
                t.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| malformed(format!("`hourly.time` entry {} is not a string", t)))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => return Err(malformed(format!("`hourly.time` is not an array: {}", other))),
    };

    Ok(HourlyPrecipitation { time, precipitation })
}

// ---------------------------------------------------------------------------
// Rainfall total
// ---------------------------------------------------------------------------

/// Sums 24 hourly entries of the series and rounds to one decimal.
///
/// - `Leading` sums the first 24 entries; a shorter series sums what is there.
/// - `Trailing` sums the last 24 entries stamped at or before the current
///   hour, which needs `hourly.time` aligned with the values.
///
/// A `null`, negative or non-finite entry inside the window is a `Parse` error.
pub fn rainfall_24h(
    series: &HourlyPrecipitation,
    window: RainfallWindow,
    now: DateTime<Utc>,
) -> Result<f64, FetchError> {
    let range = match window {
        RainfallWindow::Leading => 0..series.precipitation.len().min(WINDOW_HOURS),
        RainfallWindow::Trailing => trailing_range(series, now)?,
    };

    let mut total = 0.0;
    for i in range {
        let value = series.precipitation[i]
            .ok_or_else(|| parse_error(format!("hour {}: precipitation is null", i)))?;
        if !value.is_finite() || value < 0.0 {
            return Err(parse_error(format!("hour {}: precipitation {} is invalid", i, value)));
        }
        total += value;
    }

    Ok(round_one_decimal(total))
}

/// Index range of the 24 entries ending at the current hour.
fn trailing_range(
    series: &HourlyPrecipitation,
    now: DateTime<Utc>,
) -> Result<std::ops::Range<usize>, FetchError> {
    if series.time.len() != series.precipitation.len() {
        return Err(malformed(format!(
            "`hourly.time` has {} entries but `hourly.precipitation` has {}",
            series.time.len(),
            series.precipitation.len()
        )));
    }

    let current_hour = now
        .naive_utc()
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| malformed("cannot truncate current time to the hour".to_string()))?;

    let mut end = 0;
    for (i, stamp) in series.time.iter().enumerate() {
        let at = NaiveDateTime::parse_from_str(stamp, TIME_FORMAT)
            .map_err(|e| malformed(format!("bad timestamp '{}': {}", stamp, e)))?;
        if at <= current_hour {
            end = i + 1;
        }
    }

    if end == 0 {
        return Err(malformed(format!(
            "no hourly entries at or before {}",
            current_hour.format(TIME_FORMAT)
        )));
    }

    Ok(end.saturating_sub(WINDOW_HOURS)..end)
}

/// Rounds half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn malformed(message: String) -> FetchError {
    FetchError::MalformedResponse {
        upstream: UPSTREAM,
        message,
    }
}

fn parse_error(message: String) -> FetchError {
    FetchError::Parse {
        upstream: UPSTREAM,
        message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
