//! RBAC data source trait
//!
//! The analyzer never talks to a cluster directly; it asks an [`RbacSource`]
//! for the five listings below. Implementations own transport, paging and any
//! retry policy.

use async_trait::async_trait;

use crate::core::types::{RawBinding, RawGrant};
use crate::utils::error::SourceError;

/// Result type for data source calls
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Provider of raw roles and bindings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RbacSource: Send + Sync {
    /// Namespace names, in the order they should be scanned
    async fn list_namespaces(&self) -> SourceResult<Vec<String>>;

    /// ClusterRoles
    async fn list_cluster_grants(&self) -> SourceResult<Vec<RawGrant>>;

    /// Roles in one namespace
    async fn list_namespaced_grants(&self, namespace: &str) -> SourceResult<Vec<RawGrant>>;

    /// ClusterRoleBindings
    async fn list_cluster_bindings(&self) -> SourceResult<Vec<RawBinding>>;

    /// RoleBindings in one namespace
    async fn list_namespaced_bindings(&self, namespace: &str) -> SourceResult<Vec<RawBinding>>;
}
