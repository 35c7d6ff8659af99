//! Logging setup for the binary.
//!
//! Installs a global `tracing` subscriber writing to stderr so that stdout
//! stays clean for command output (`--format json`).

use tracing_subscriber::EnvFilter;

/// Initialize tracing. `RUST_LOG` wins over the configured default filter.
///
/// Subsequent calls fail; the error is returned so callers can keep going
/// without logging.
pub fn init(default_filter: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(default_filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}

fn build_env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
