//! Sillaro Sentinel - flood risk dashboard engine
//!
//! Runs one refresh cycle at startup:
//! 1. Fetches the live CSP river level (ARPAE) and 24 h rainfall (Open-Meteo)
//! 2. Classifies the level against the calibrated historical thresholds
//! 3. Merges the live point with past flood/containment events
//! 4. Prints the report, then optionally serves snapshots over HTTP
//!
//! Usage:
//!   cargo run --release                          # One refresh, print report
//!   cargo run --release -- --endpoint 8080       # Also serve JSON on port 8080
//!   cargo run --release -- --config other.toml   # Use another configuration file
//!
//! Environment:
//!   SENTINEL_CONFIG - configuration file path (default: sentinel.toml)
//!   RUST_LOG        - tracing filter, overrides `log_filter`

use sillaro_sentinel::config::{self, DEFAULT_CONFIG_PATH};
use sillaro_sentinel::endpoint;
use sillaro_sentinel::engine::RiskEngine;
use sillaro_sentinel::logging;
use sillaro_sentinel::report::render_report;
use std::env;
use std::path::PathBuf;

/// Exit code when the dashboard could not be rendered from live data.
const EXIT_UNAVAILABLE: i32 = 2;

fn main() {
    dotenv::dotenv().ok();

    println!("🌊 Sillaro Real-Time Sentinel");
    println!("=============================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut endpoint_port: Option<u16> = None;
    let mut config_path: Option<PathBuf> = env::var("SENTINEL_CONFIG").ok().map(PathBuf::from);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                match args.get(i + 1).and_then(|p| p.parse().ok()) {
                    Some(port) => endpoint_port = Some(port),
                    None => {
                        eprintln!("Error: --endpoint requires a port number");
                        std::process::exit(1);
                    }
                }
                i += 2;
            }
            "--config" => {
                match args.get(i + 1) {
                    Some(path) => config_path = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("Error: --config requires a file path");
                        std::process::exit(1);
                    }
                }
                i += 2;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--config PATH] [--endpoint PORT]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // An explicitly named file must exist; the default one may be absent.
    let required = config_path.is_some();
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = match config::load_config(&path, required) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    logging::init(&config.log_filter);

    let engine = match RiskEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ Engine setup failed: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "📊 Thresholds: medium ≥ {:.2} m, high > {:.2} m ({:?})\n",
        engine.thresholds().low(),
        engine.thresholds().high(),
        engine.policy()
    );

    let snapshot = engine.refresh();
    println!("{}", render_report(&snapshot));

    match endpoint_port {
        Some(port) => {
            println!("🚀 Starting HTTP endpoint server...");
            if let Err(e) = endpoint::start_endpoint_server(port, engine) {
                eprintln!("❌ Endpoint server error: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            if !snapshot.is_ready() {
                std::process::exit(EXIT_UNAVAILABLE);
            }
        }
    }
}
