/// sillaro_sentinel: Sillaro river flood risk assessment engine.
///
/// # Module structure
///
/// ```text
/// sillaro_sentinel
/// ├── model       - shared data types (HistoricalEvent, LiveReading, RiskTier, FetchError, …)
/// ├── catalog     - historical flood/containment events, calibration source
/// ├── config      - engine configuration loader (sentinel.toml)
/// ├── ingest
/// │   ├── transport  - HTTP GET seam (reqwest blocking client)
/// │   ├── arpae      - ARPAE hydrometric sensor: river level
/// │   ├── open_meteo - Open-Meteo hourly precipitation: 24 h rainfall
/// │   └── fixtures (test only) - representative API response payloads
/// ├── fetcher     - parallel level + rainfall acquisition with failure policy
/// ├── alert
/// │   └── risk    - level → risk tier threshold ladder
/// ├── analysis
/// │   └── merge   - historical events + live point, in display order
/// ├── engine      - refresh cycle (fetch → classify → merge) and Snapshot
/// ├── report      - plain-text rendering of a Snapshot
/// ├── endpoint    - JSON HTTP API for the dashboard front end
/// └── logging     - tracing subscriber setup
/// ```

/// Public modules
pub mod alert;
pub mod analysis;
pub mod catalog;
pub mod config;
pub mod endpoint;
pub mod engine;
pub mod fetcher;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod report;
