//! Analyzer builder

use std::sync::Arc;

use super::budget::ResultLimit;
use super::engine::Analyzer;
use crate::core::filter::FilterSpec;
use crate::core::traits::RbacSource;
use crate::utils::error::{MapperError, Result};

/// Builder for [`Analyzer`]
#[derive(Default)]
pub struct AnalyzerBuilder {
    source: Option<Arc<dyn RbacSource>>,
    filter: Option<FilterSpec>,
    limit: ResultLimit,
}

impl AnalyzerBuilder {
    /// Create a new builder with the default ceiling and no filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data source
    pub fn with_source<S: RbacSource + 'static>(self, source: S) -> Self {
        self.with_shared_source(Arc::new(source))
    }

    /// Set a data source that is shared with other owners
    pub fn with_shared_source(mut self, source: Arc<dyn RbacSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the grant filter
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the result ceiling
    pub fn with_limit(mut self, limit: ResultLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Build the analyzer
    pub fn build(self) -> Result<Analyzer> {
        let source = self
            .source
            .ok_or_else(|| MapperError::construction("a data source is required"))?;

        Ok(Analyzer::new(source, self.filter, self.limit))
    }
}
