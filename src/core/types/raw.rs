//! Raw records as supplied by a data source
//!
//! These mirror the shape of the RBAC API objects closely enough that both
//! the REST client and offline snapshots can produce them without loss.

use serde::{Deserialize, Serialize};

/// Unnormalized policy rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRule {
    #[serde(default, alias = "apiGroups")]
    pub api_groups: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub verbs: Vec<String>,
}

/// Role or ClusterRole as listed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGrant {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RawRule>,
}

/// Binding subject as listed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubject {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// RoleBinding or ClusterRoleBinding as listed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBinding {
    pub name: String,
    #[serde(alias = "roleRefKind")]
    pub role_ref_kind: String,
    #[serde(alias = "roleRefName")]
    pub role_ref_name: String,
    #[serde(default)]
    pub subjects: Vec<RawSubject>,
}

impl RawRule {
    pub fn new<G, R, V>(api_groups: G, resources: R, verbs: V) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            api_groups: api_groups.into_iter().map(Into::into).collect(),
            resources: resources.into_iter().map(Into::into).collect(),
            verbs: verbs.into_iter().map(Into::into).collect(),
        }
    }
}

impl RawGrant {
    pub fn new<S: Into<String>>(name: S, rules: Vec<RawRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

impl RawSubject {
    pub fn new<K: Into<String>, N: Into<String>>(kind: K, name: N, namespace: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            namespace: namespace.map(str::to_string),
        }
    }
}

impl RawBinding {
    pub fn new<N, K, R>(name: N, role_ref_kind: K, role_ref_name: R, subjects: Vec<RawSubject>) -> Self
    where
        N: Into<String>,
        K: Into<String>,
        R: Into<String>,
    {
        Self {
            name: name.into(),
            role_ref_kind: role_ref_kind.into(),
            role_ref_name: role_ref_name.into(),
            subjects,
        }
    }
}
