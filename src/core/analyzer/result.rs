//! Analysis output

use crate::core::types::{BindingGrant, PermissionGrant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary counters, derived from the result they describe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Namespaces whose roles were fetched
    pub total_namespaces: usize,
    /// Namespaces that kept at least one role after filtering
    pub namespaces_with_roles: usize,
    /// Retained namespaced roles
    pub total_roles: usize,
    /// Retained cluster roles
    pub total_cluster_roles: usize,
    /// Retained bindings, namespaced and cluster-wide
    pub total_bindings: usize,
}

/// Everything one analysis run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Roles per namespace; namespaces with no retained roles are absent
    pub namespace_roles: BTreeMap<String, Vec<PermissionGrant>>,
    pub cluster_roles: Vec<PermissionGrant>,
    /// Bindings per namespace, each list sorted by name
    pub namespace_bindings: BTreeMap<String, Vec<BindingGrant>>,
    /// Cluster bindings, sorted by name
    pub cluster_bindings: Vec<BindingGrant>,
    pub stats: Stats,
    /// Set when the result ceiling stopped enumeration early
    pub truncated: bool,
}

impl Stats {
    /// Count what `result` actually holds
    pub fn tally(result: &AnalysisResult, namespaces_scanned: usize) -> Self {
        Self {
            total_namespaces: namespaces_scanned,
            namespaces_with_roles: result
                .namespace_roles
                .values()
                .filter(|roles| !roles.is_empty())
                .count(),
            total_roles: result.namespace_roles.values().map(Vec::len).sum(),
            total_cluster_roles: result.cluster_roles.len(),
            total_bindings: result.cluster_bindings.len()
                + result.namespace_bindings.values().map(Vec::len).sum::<usize>(),
        }
    }
}

impl AnalysisResult {
    /// Whether every scope was enumerated without hitting the ceiling
    pub fn is_complete(&self) -> bool {
        !self.truncated
    }

    /// Roles and cluster roles together
    pub fn total_grants(&self) -> usize {
        self.stats.total_roles + self.stats.total_cluster_roles
    }
}
