/// HTTP endpoint for the dashboard front end
///
/// Serves engine snapshots as JSON for the page/chart layer. Each dashboard
/// request runs one fresh refresh cycle; requests are handled one at a
/// time so cycles never overlap.
///
/// Endpoints:
/// - GET /dashboard - Run a refresh cycle and return tier, reading and dataset
/// - GET /refresh   - Same as /dashboard (the refresh button)
/// - GET /history   - Historical catalog and active thresholds
/// - GET /health    - Service health check

use serde_json::{Value, json};
use tracing::{info, warn};

use crate::engine::{RiskEngine, Snapshot};

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Resolves a request path to a status code and JSON body.
pub fn route(engine: &RiskEngine, url: &str) -> (u16, Value) {
    let path = url.split('?').next().unwrap_or(url).trim_end_matches('/');

    match path {
        "/health" => (200, health_body()),
        "/dashboard" | "/refresh" => snapshot_response(&engine.refresh()),
        "/history" => (200, history_body(engine)),
        _ => (
            404,
            json!({
                "error": "Not found",
                "available_endpoints": ["/dashboard", "/refresh", "/history", "/health"]
            }),
        ),
    }
}

/// JSON body for a snapshot: 200 when ready, 503 with a retry hint otherwise.
pub fn snapshot_response(snapshot: &Snapshot) -> (u16, Value) {
    match snapshot {
        Snapshot::Ready { tier, reading, dataset } => (
            200,
            json!({
                "state": "ready",
                "tier": tier,
                "headline": tier.headline(),
                "banner": tier.banner_style(),
                "reading": reading,
                "dataset": dataset.rows,
            }),
        ),
        Snapshot::Unavailable { reading, error } => (
            503,
            json!({
                "state": "unavailable",
                "reading": reading,
                "error": {
                    "kind": error.kind(),
                    "upstream": error.upstream(),
                    "message": error.to_string(),
                },
                "retry": "/refresh",
            }),
        ),
    }
}

fn health_body() -> Value {
    json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION
    })
}

fn history_body(engine: &RiskEngine) -> Value {
    json!({
        "events": engine.catalog().events(),
        "thresholds": engine.thresholds(),
        "failure_policy": format!("{:?}", engine.policy()),
    })
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port
pub fn start_endpoint_server(port: u16, engine: RiskEngine) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    info!(port, "HTTP endpoint listening");
    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /dashboard - Refresh and return the risk snapshot");
    println!("   GET /history   - Historical events and thresholds");
    println!("   GET /health    - Service health check\n");

    serve(&server, &engine);
    Ok(())
}

/// Handles requests until the server is dropped.
pub fn serve(server: &tiny_http::Server, engine: &RiskEngine) {
    for request in server.incoming_requests() {
        let (status, body) = if *request.method() == tiny_http::Method::Get {
            route(engine, request.url())
        } else {
            (405, json!({ "error": "Method not allowed" }))
        };

        info!(method = %request.method(), url = request.url(), status, "request served");

        if let Err(e) = request.respond(create_response(status, &body)) {
            warn!(error = %e, "failed to send response");
        }
    }
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: &Value) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(json).unwrap_or_else(|_| "{}".to_string());

    let mut response = tiny_http::Response::from_data(body.into_bytes())
        .with_status_code(tiny_http::StatusCode::from(status_code));
    if let Ok(header) = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response.add_header(header);
    }
    response
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
