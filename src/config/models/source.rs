//! Data source configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Data source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Kubeconfig path; `$KUBECONFIG` or `~/.kube/config` when unset
    #[serde(default)]
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context; the current context when unset
    #[serde(default)]
    pub context: Option<String>,
    /// Read an offline snapshot instead of a live cluster
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Items per list page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            snapshot: None,
            timeout: default_timeout(),
            page_size: default_page_size(),
        }
    }
}
