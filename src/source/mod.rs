//! RBAC data sources
//!
//! - [`KubeSource`]: live cluster through the Kubernetes REST API
//! - [`SnapshotSource`]: offline YAML/JSON dump of roles and bindings

pub mod kube;
pub mod snapshot;

pub use kube::{KubeSource, Kubeconfig};
pub use snapshot::{NamespaceSnapshot, Snapshot, SnapshotSource};
