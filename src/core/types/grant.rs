//! Permission grants (Roles and ClusterRoles)

use super::scope::Scope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One clause of a grant: qualified resource names and the verbs allowed on them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Resource identifiers, `group/resource` for non-core API groups
    pub resources: Vec<String>,
    /// Allowed verbs
    pub verbs: Vec<String>,
}

/// Role or ClusterRole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantKind {
    Role,
    ClusterRole,
}

impl fmt::Display for GrantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role => write!(f, "Role"),
            Self::ClusterRole => write!(f, "ClusterRole"),
        }
    }
}

/// A named bundle of permission rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub name: String,
    pub scope: Scope,
    pub rules: Vec<Rule>,
}

impl PermissionGrant {
    pub fn namespace(&self) -> Option<&str> {
        self.scope.namespace()
    }

    pub fn kind(&self) -> GrantKind {
        match self.scope {
            Scope::Namespaced(_) => GrantKind::Role,
            Scope::Cluster => GrantKind::ClusterRole,
        }
    }
}
