/// Logging setup for the sentinel binary.
///
/// Library code only emits `tracing` events; installing a subscriber is the
/// binary's job. `RUST_LOG` wins over the configured filter.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
