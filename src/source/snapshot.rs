//! Offline snapshot data source

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::core::traits::{RbacSource, SourceResult};
use crate::core::types::{RawBinding, RawGrant};
use crate::utils::error::SourceError;

/// Roles and bindings of one namespace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceSnapshot {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<RawGrant>,
    #[serde(default)]
    pub bindings: Vec<RawBinding>,
}

/// Point-in-time copy of a cluster's RBAC objects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Namespaces in scan order
    #[serde(default)]
    pub namespaces: Vec<NamespaceSnapshot>,
    #[serde(default)]
    pub cluster_roles: Vec<RawGrant>,
    #[serde(default)]
    pub cluster_bindings: Vec<RawBinding>,
}

impl Snapshot {
    /// Parse a snapshot document; `.json` paths are read as JSON, anything
    /// else as YAML.
    pub fn parse(content: &str, path: &Path) -> SourceResult<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(content).map_err(|e| {
                SourceError::snapshot(format!("invalid JSON in {}: {}", path.display(), e))
            })
        } else {
            serde_yaml::from_str(content).map_err(|e| {
                SourceError::snapshot(format!("invalid YAML in {}: {}", path.display(), e))
            })
        }
    }

    fn namespace(&self, name: &str) -> Option<&NamespaceSnapshot> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }
}

/// Serves listings from an in-memory [`Snapshot`]
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let path = path.as_ref();
        info!("Loading RBAC snapshot from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SourceError::snapshot(format!("failed to read {}: {}", path.display(), e))
        })?;
        let snapshot = Snapshot::parse(&content, path)?;

        debug!(
            "Snapshot loaded: {} namespaces, {} cluster roles, {} cluster bindings",
            snapshot.namespaces.len(),
            snapshot.cluster_roles.len(),
            snapshot.cluster_bindings.len()
        );
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[async_trait]
impl RbacSource for SnapshotSource {
    async fn list_namespaces(&self) -> SourceResult<Vec<String>> {
        Ok(self
            .snapshot
            .namespaces
            .iter()
            .map(|ns| ns.name.clone())
            .collect())
    }

    async fn list_cluster_grants(&self) -> SourceResult<Vec<RawGrant>> {
        Ok(self.snapshot.cluster_roles.clone())
    }

    async fn list_namespaced_grants(&self, namespace: &str) -> SourceResult<Vec<RawGrant>> {
        // unknown namespaces list as empty, like the API server
        Ok(self
            .snapshot
            .namespace(namespace)
            .map(|ns| ns.roles.clone())
            .unwrap_or_default())
    }

    async fn list_cluster_bindings(&self) -> SourceResult<Vec<RawBinding>> {
        Ok(self.snapshot.cluster_bindings.clone())
    }

    async fn list_namespaced_bindings(&self, namespace: &str) -> SourceResult<Vec<RawBinding>> {
        Ok(self
            .snapshot
            .namespace(namespace)
            .map(|ns| ns.bindings.clone())
            .unwrap_or_default())
    }
}
