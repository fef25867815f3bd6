/// ARPAE hydrometric sensor client.
///
/// The "lastdata" endpoint for a single sensor returns one JSON object whose
/// `value` field is the latest river level in meters. See `fixtures.rs` for
/// sample payloads.

use serde_json::Value;

use crate::ingest::transport::Transport;
use crate::model::{FetchError, Upstream};

const UPSTREAM: Upstream = Upstream::Hydrometric;

/// GETs the sensor URL and parses the level out of the body.
pub fn fetch_level(transport: &dyn Transport, url: &str) -> Result<f64, FetchError> {
    let body = transport.get(url).map_err(|message| FetchError::Network {
        upstream: UPSTREAM,
        message,
    })?;
    parse_level_response(&body)
}

/// Parses the level (m) from a sensor response body.
///
/// # Errors
/// - `MalformedResponse` - not JSON, not an object, or no `value` field.
/// - `Parse` - `value` present but not a finite, non-negative number
///   (numeric strings such as `"1.52"` are accepted).
pub fn parse_level_response(json: &str) -> Result<f64, FetchError> {
    let document: Value = serde_json::from_str(json).map_err(|e| FetchError::MalformedResponse {
        upstream: UPSTREAM,
        message: format!("JSON deserialization failed: {}", e),
    })?;

    let field = document
        .as_object()
        .ok_or_else(|| malformed("response is not a JSON object"))?
        .get("value")
        .ok_or_else(|| malformed("missing `value` field"))?;

    let level = match field {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| parse_error(format!("`value` {} is not representable as f64", n)))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| parse_error(format!("failed to parse value '{}': {}", s, e)))?,
        other => return Err(parse_error(format!("`value` has unusable type: {}", other))),
    };

    if !level.is_finite() || level < 0.0 {
        return Err(parse_error(format!("level {} is not a non-negative number", level)));
    }

    Ok(level)
}

fn malformed(message: &str) -> FetchError {
    FetchError::MalformedResponse {
        upstream: UPSTREAM,
        message: message.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;
    use crate::ingest::transport::stub::StubTransport;

    // --- Parsing: happy path ------------------------------------------------

    #[test]
    fn test_parse_numeric_value() {
        let level = parse_level_response(fixture_level_high_json()).expect("fixture should parse");
        assert!((level - 1.80).abs() < 1e-9, "level should be 1.80 m, got {}", level);
    }

    #[test]
    fn test_parse_numeric_string_value() {
        let level = parse_level_response(fixture_level_string_json()).expect("numeric string is castable");
        assert!((level - 1.52).abs() < 1e-9, "got {}", level);
    }

    #[test]
    fn test_parse_integer_value() {
        assert_eq!(parse_level_response(r#"{ "value": 2 }"#), Ok(2.0));
    }

    // --- Parsing: error and edge cases --------------------------------------

    #[test]
    fn test_null_value_is_parse_error() {
        let result = parse_level_response(fixture_level_null_json());
        assert!(matches!(result, Err(FetchError::Parse { .. })), "got {:?}", result);
    }

    #[test]
    fn test_non_numeric_string_is_parse_error() {
        let result = parse_level_response(r#"{ "value": "n/a" }"#);
        assert!(matches!(result, Err(FetchError::Parse { .. })), "got {:?}", result);
    }

    #[test]
    fn test_negative_level_is_parse_error() {
        let result = parse_level_response(r#"{ "value": -0.3 }"#);
        assert!(matches!(result, Err(FetchError::Parse { .. })), "got {:?}", result);
    }

    #[test]
    fn test_missing_value_field_is_malformed() {
        let result = parse_level_response(r#"{ "date": "2025-12-03T09:00:00" }"#);
        assert!(matches!(result, Err(FetchError::MalformedResponse { .. })), "got {:?}", result);
    }

    #[test]
    fn test_array_body_is_malformed() {
        let result = parse_level_response(r#"[{ "value": 1.0 }]"#);
        assert!(matches!(result, Err(FetchError::MalformedResponse { .. })), "got {:?}", result);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let result = parse_level_response("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(FetchError::MalformedResponse { .. })), "got {:?}", result);
    }

    #[test]
    fn test_errors_name_hydrometric_upstream() {
        let err = parse_level_response("").unwrap_err();
        assert_eq!(err.upstream(), Upstream::Hydrometric);
    }

    // --- Fetch --------------------------------------------------------------

    #[test]
    fn test_fetch_level_through_transport() {
        let transport = StubTransport::new().ok("http://hydro", fixture_level_high_json());
        let level = fetch_level(&transport, "http://hydro/lastdata").expect("should fetch");
        assert!((level - 1.80).abs() < 1e-9);
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_transport_failure_is_network_error() {
        let transport = StubTransport::new().fail("http://hydro", "connection refused");
        let result = fetch_level(&transport, "http://hydro/lastdata");
        match result {
            Err(FetchError::Network { upstream, message }) => {
                assert_eq!(upstream, Upstream::Hydrometric);
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected network error, got {:?}", other),
        }
    }
}
