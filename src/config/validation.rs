//! Configuration validation

use super::models::*;
use crate::core::analyzer::UNLIMITED_RESULTS;
use crate::utils::error::{MapperError, Result};
use tracing::debug;

/// Configuration validation trait
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for MapperConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating mapper configuration");

        self.source.validate()?;
        self.analysis.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Validate for SourceConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            return Err(MapperError::config("Source timeout must be greater than 0"));
        }
        if self.page_size == 0 {
            return Err(MapperError::config("Source page size must be greater than 0"));
        }
        if self.snapshot.is_some() && self.context.is_some() {
            return Err(MapperError::config(
                "A kubeconfig context cannot be combined with a snapshot file",
            ));
        }
        Ok(())
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<()> {
        if self.limit < UNLIMITED_RESULTS {
            return Err(MapperError::config(format!(
                "Result limit must be {} (unlimited), 0 (default) or positive, got {}",
                UNLIMITED_RESULTS, self.limit
            )));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            return Err(MapperError::config("Log level cannot be empty"));
        }
        Ok(())
    }
}
