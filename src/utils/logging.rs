//! Diagnostics setup
//!
//! Logs go to stderr so that stdout only ever carries the report.

use tracing_subscriber::EnvFilter;

use crate::utils::error::{MapperError, Result};

/// Parse a `tracing` filter directive such as `info` or `rbac_mapper=debug`
pub fn log_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level.trim())
        .map_err(|e| MapperError::config(format!("Invalid log level '{}': {}", level, e)))
}

/// Install the global subscriber
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = log_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| MapperError::config(format!("Failed to initialize logging: {}", e)))
}
