/// Refresh cycle for the flood risk dashboard.
///
/// One `refresh()` is one full pass: fetch → classify → merge. Cycles share
/// nothing but the immutable catalog and the resolved thresholds; the
/// resulting `Snapshot` is handed to whichever presentation layer asked.

use std::sync::Arc;
use tracing::{info, warn};

use crate::alert::risk::{RiskClassifier, RiskThresholds};
use crate::analysis::merge::merge;
use crate::catalog::HistoricalCatalog;
use crate::config::{ConfigError, FailurePolicy, SentinelConfig};
use crate::fetcher::LiveReadingFetcher;
use crate::ingest::transport::{HttpTransport, Transport};
use crate::model::{FetchError, LiveReading, MergedDataset, RiskTier, Upstream};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything one render pass needs, or the reason it cannot render.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Ready {
        tier: RiskTier,
        reading: LiveReading,
        dataset: MergedDataset,
    },
    /// Fail-hard acquisition failed; the UI should offer a retry.
    Unavailable {
        reading: LiveReading,
        error: FetchError,
    },
}

impl Snapshot {
    pub fn tier(&self) -> Option<RiskTier> {
        match self {
            Snapshot::Ready { tier, .. } => Some(*tier),
            Snapshot::Unavailable { .. } => None,
        }
    }

    pub fn reading(&self) -> &LiveReading {
        match self {
            Snapshot::Ready { reading, .. } | Snapshot::Unavailable { reading, .. } => reading,
        }
    }

    pub fn dataset(&self) -> Option<&MergedDataset> {
        match self {
            Snapshot::Ready { dataset, .. } => Some(dataset),
            Snapshot::Unavailable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Snapshot::Ready { .. })
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The risk assessment engine: catalog, classifier and fetcher wired
/// together from one configuration.
pub struct RiskEngine {
    catalog: &'static HistoricalCatalog,
    classifier: RiskClassifier,
    fetcher: LiveReadingFetcher,
}

impl RiskEngine {
    /// Builds an engine over the Sillaro catalog with a reqwest transport.
    pub fn from_config(config: &SentinelConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config.request_timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Builds an engine over the Sillaro catalog with the given transport.
    pub fn with_transport(
        config: &SentinelConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        Self::with_catalog(config, HistoricalCatalog::sillaro(), transport)
    }

    /// Builds an engine over an arbitrary catalog.
    pub fn with_catalog(
        config: &SentinelConfig,
        catalog: &'static HistoricalCatalog,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let thresholds = config.thresholds(catalog)?;

        info!(
            low = thresholds.low(),
            high = thresholds.high(),
            policy = ?config.failure_policy,
            window = ?config.rainfall_window,
            "risk engine configured"
        );

        Ok(Self {
            catalog,
            classifier: RiskClassifier::new(thresholds),
            fetcher: LiveReadingFetcher::new(config, transport),
        })
    }

    pub fn catalog(&self) -> &'static HistoricalCatalog {
        self.catalog
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.classifier.thresholds()
    }

    pub fn policy(&self) -> FailurePolicy {
        self.fetcher.policy()
    }

    /// Runs one refresh cycle.
    pub fn refresh(&self) -> Snapshot {
        match self.fetcher.fetch() {
            Ok(reading) => self.assess(reading),
            Err(error) => {
                warn!(
                    upstream = %error.upstream(),
                    kind = error.kind(),
                    error = %error,
                    "live data unavailable"
                );
                Snapshot::Unavailable {
                    reading: LiveReading::unavailable(chrono::Utc::now()),
                    error,
                }
            }
        }
    }

    /// Classifies and merges an already-acquired reading.
    ///
    /// A reading without a level (only produced for unavailable cycles)
    /// cannot be classified and is reported as unavailable.
    pub fn assess(&self, reading: LiveReading) -> Snapshot {
        let Some(level_m) = reading.level_m else {
            let error = FetchError::MalformedResponse {
                upstream: Upstream::Hydrometric,
                message: "reading carries no level".to_string(),
            };
            return Snapshot::Unavailable { reading, error };
        };

        let tier = self.classifier.classify(level_m);
        let dataset = merge(self.catalog, &reading);

        info!(
            level_m,
            rainfall_24h_mm = ?reading.rainfall_24h_mm,
            status = ?reading.source_status,
            tier = %tier,
            "risk assessed"
        );

        Snapshot::Ready { tier, reading, dataset }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
