//! Logging initialization.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to the
//! whole binary.

use tracing_subscriber::EnvFilter;

pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
