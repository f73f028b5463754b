//! Bindings (RoleBindings and ClusterRoleBindings)

use super::scope::Scope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grant a binding points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    /// `Role` or `ClusterRole`
    pub kind: String,
    pub name: String,
}

/// Identity attached by a binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// `User`, `Group` or `ServiceAccount`
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// RoleBinding or ClusterRoleBinding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingKind {
    RoleBinding,
    ClusterRoleBinding,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoleBinding => write!(f, "RoleBinding"),
            Self::ClusterRoleBinding => write!(f, "ClusterRoleBinding"),
        }
    }
}

/// A named attachment of subjects to a grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingGrant {
    pub name: String,
    pub scope: Scope,
    pub role_ref: RoleRef,
    /// Subjects in source order, duplicates kept
    pub subjects: Vec<Subject>,
}

impl BindingGrant {
    pub fn namespace(&self) -> Option<&str> {
        self.scope.namespace()
    }

    pub fn kind(&self) -> BindingKind {
        match self.scope {
            Scope::Namespaced(_) => BindingKind::RoleBinding,
            Scope::Cluster => BindingKind::ClusterRoleBinding,
        }
    }
}
