//! Top-level mapper configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Complete mapper configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Where RBAC data comes from
    #[serde(default)]
    pub source: SourceConfig,
    /// Filter and limit settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Report settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Diagnostics settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `rbac_mapper=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
