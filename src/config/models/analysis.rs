//! Filter and limit configuration

use serde::{Deserialize, Serialize};

use crate::core::analyzer::ResultLimit;
use crate::core::filter::FilterSpec;
use crate::utils::error::Result;

/// Analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Keep only grants allowing one of these verbs
    #[serde(default)]
    pub verbs: Vec<String>,
    /// Keep only grants covering one of these resources
    #[serde(default)]
    pub resources: Vec<String>,
    /// Result ceiling: 0 for the default, -1 for unlimited
    #[serde(default)]
    pub limit: i64,
}

impl AnalysisConfig {
    /// Filter built from the configured verbs and resources, blanks dropped
    pub fn filter(&self) -> FilterSpec {
        FilterSpec::new(non_blank(&self.verbs), non_blank(&self.resources))
    }

    pub fn result_limit(&self) -> Result<ResultLimit> {
        ResultLimit::from_setting(self.limit)
    }
}

fn non_blank(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}
