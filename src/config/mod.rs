//! Configuration management for the mapper
//!
//! Settings come from an optional YAML file and the command line; flags given
//! on the command line take precedence over the file.

pub mod cli;
pub mod models;
pub mod validation;

pub use cli::Cli;
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{MapperError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the mapper
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub mapper: MapperConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MapperError::Config(format!("Failed to read config file: {}", e)))?;

        let mapper: MapperConfig = serde_yaml::from_str(&content)
            .map_err(|e| MapperError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { mapper };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build the effective configuration for a command-line invocation
    ///
    /// The file, if any, is read first; every flag given on the command line
    /// then replaces the corresponding setting.
    pub async fn load(cli: &Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        let config = Self {
            mapper: cli.apply(base.mapper),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn source(&self) -> &SourceConfig {
        &self.mapper.source
    }

    pub fn analysis(&self) -> &AnalysisConfig {
        &self.mapper.analysis
    }

    pub fn output(&self) -> &OutputConfig {
        &self.mapper.output
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.mapper.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.mapper.validate()
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.mapper)
            .map_err(|e| MapperError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
