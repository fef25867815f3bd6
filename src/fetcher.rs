/// Live reading acquisition with an explicit failure policy.
///
/// `fetch()` issues the hydrometric and meteorological requests in parallel
/// on a two-worker pool, waits for both, then applies the configured
/// `FailurePolicy`:
///
/// - `FailSoft`: any failure on either side substitutes the fallback pair
///   for *both* values (a mixed live/fallback reading is never produced).
/// - `FailHard`: the failure is returned; a hydrometric error wins over a
///   meteorological one.
///
/// Nothing is cached or retried: every call goes to the network.

use chrono::{DateTime, Utc};
use std::sync::mpsc;
use std::sync::Arc;
use threadpool::ThreadPool;
use tracing::{debug, warn};

use crate::config::{FailurePolicy, RainfallWindow, SentinelConfig};
use crate::ingest::open_meteo::build_forecast_url;
use crate::ingest::transport::Transport;
use crate::ingest::{arpae, open_meteo};
use crate::model::{FetchError, LiveReading, Upstream};

/// Acquires one `LiveReading` per call from the two upstreams.
pub struct LiveReadingFetcher {
    transport: Arc<dyn Transport>,
    hydro_url: String,
    meteo_url: String,
    window: RainfallWindow,
    policy: FailurePolicy,
    fallback_level: f64,
    fallback_rainfall: f64,
    pool: ThreadPool,
}

impl LiveReadingFetcher {
    pub fn new(config: &SentinelConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            hydro_url: config.hydro_endpoint.clone(),
            meteo_url: build_forecast_url(&config.meteo_endpoint, config.lat, config.lon),
            window: config.rainfall_window,
            policy: config.failure_policy,
            fallback_level: config.fallback_level,
            fallback_rainfall: config.fallback_rainfall,
            pool: ThreadPool::with_name("sentinel-fetch".to_string(), 2),
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Fetches level and rainfall. Under `FailSoft` this never returns `Err`.
    pub fn fetch(&self) -> Result<LiveReading, FetchError> {
        let fetched_at = Utc::now();
        let (level, rainfall) = self.fetch_both(fetched_at);

        match self.policy {
            FailurePolicy::FailSoft => match (level, rainfall) {
                (Ok(level_m), Ok(rainfall_mm)) => {
                    debug!(level_m, rainfall_mm, "live reading acquired");
                    Ok(LiveReading::live(level_m, rainfall_mm, fetched_at))
                }
                (level, rainfall) => {
                    for err in [level.err(), rainfall.err()].into_iter().flatten() {
                        warn!(
                            upstream = %err.upstream(),
                            kind = err.kind(),
                            error = %err,
                            "live fetch failed, substituting offline calibration values"
                        );
                    }
                    Ok(LiveReading::fallback(
                        self.fallback_level,
                        self.fallback_rainfall,
                        fetched_at,
                    ))
                }
            },
            FailurePolicy::FailHard => {
                // Hydrometric first, so a rainfall outcome never masks it.
                let level_m = level?;
                let rainfall_mm = rainfall?;
                debug!(level_m, rainfall_mm, "live reading acquired");
                Ok(LiveReading::live(level_m, rainfall_mm, fetched_at))
            }
        }
    }

    /// Runs both requests on the pool and joins them.
    fn fetch_both(&self, now: DateTime<Utc>) -> (Result<f64, FetchError>, Result<f64, FetchError>) {
        let (level_tx, level_rx) = mpsc::channel();
        let (rain_tx, rain_rx) = mpsc::channel();

        let transport = Arc::clone(&self.transport);
        let url = self.hydro_url.clone();
        self.pool.execute(move || {
            let _ = level_tx.send(arpae::fetch_level(transport.as_ref(), &url));
        });

        let transport = Arc::clone(&self.transport);
        let url = self.meteo_url.clone();
        let window = self.window;
        self.pool.execute(move || {
            let _ = rain_tx.send(open_meteo::fetch_rainfall(transport.as_ref(), &url, window, now));
        });

        let level = level_rx
            .recv()
            .unwrap_or_else(|_| Err(worker_lost(Upstream::Hydrometric)));
        let rainfall = rain_rx
            .recv()
            .unwrap_or_else(|_| Err(worker_lost(Upstream::Meteorological)));

        (level, rainfall)
    }
}

/// A worker that dropped its sender without answering (panicked).
fn worker_lost(upstream: Upstream) -> FetchError {
    FetchError::Network {
        upstream,
        message: "fetch worker terminated before responding".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
