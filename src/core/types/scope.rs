//! Scope of an RBAC entity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an entity lives: inside one namespace or cluster-wide
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "namespace")]
pub enum Scope {
    /// Namespace-local entity
    Namespaced(String),
    /// Cluster-wide entity
    Cluster,
}

impl Scope {
    pub fn namespaced<S: Into<String>>(namespace: S) -> Self {
        Self::Namespaced(namespace.into())
    }

    /// Namespace name, `None` for cluster scope
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Namespaced(namespace) => Some(namespace),
            Self::Cluster => None,
        }
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespaced(namespace) => write!(f, "{}", namespace),
            Self::Cluster => write!(f, "cluster"),
        }
    }
}
