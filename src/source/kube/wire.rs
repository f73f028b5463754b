//! Kubernetes list response shapes, reduced to the fields the mapper reads

use serde::Deserialize;

use crate::core::types::{RawBinding, RawGrant, RawRule, RawSubject};

#[derive(Debug, Deserialize)]
pub(super) struct ObjectList<T> {
    /// Absent or null when the list is empty
    pub items: Option<Vec<T>>,
    #[serde(default)]
    pub metadata: ListMeta,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ListMeta {
    #[serde(default, rename = "continue")]
    pub continue_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ObjectMeta {
    pub name: String,
}

/// `Status` body returned with API errors
#[derive(Debug, Deserialize)]
pub(super) struct Status {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Namespace {
    pub metadata: ObjectMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PolicyRule {
    #[serde(default)]
    pub api_groups: Option<Vec<String>>,
    #[serde(default)]
    pub resources: Option<Vec<String>>,
    #[serde(default)]
    pub verbs: Vec<String>,
}

/// Role and ClusterRole share this shape
#[derive(Debug, Deserialize)]
pub(super) struct Role {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub rules: Option<Vec<PolicyRule>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RoleRef {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Subject {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// RoleBinding and ClusterRoleBinding share this shape
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RoleBinding {
    pub metadata: ObjectMeta,
    pub role_ref: RoleRef,
    #[serde(default)]
    pub subjects: Option<Vec<Subject>>,
}

impl From<PolicyRule> for RawRule {
    fn from(rule: PolicyRule) -> Self {
        Self {
            api_groups: rule.api_groups.unwrap_or_default(),
            resources: rule.resources.unwrap_or_default(),
            verbs: rule.verbs,
        }
    }
}

impl From<Role> for RawGrant {
    fn from(role: Role) -> Self {
        Self {
            name: role.metadata.name,
            rules: role
                .rules
                .unwrap_or_default()
                .into_iter()
                .map(RawRule::from)
                .collect(),
        }
    }
}

impl From<Subject> for RawSubject {
    fn from(subject: Subject) -> Self {
        Self {
            kind: subject.kind,
            name: subject.name,
            namespace: subject.namespace,
        }
    }
}

impl From<RoleBinding> for RawBinding {
    fn from(binding: RoleBinding) -> Self {
        Self {
            name: binding.metadata.name,
            role_ref_kind: binding.role_ref.kind,
            role_ref_name: binding.role_ref.name,
            subjects: binding
                .subjects
                .unwrap_or_default()
                .into_iter()
                .map(RawSubject::from)
                .collect(),
        }
    }
}
