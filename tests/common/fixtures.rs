//! Snapshot fixtures
//!
//! `small_cluster` describes four namespaces:
//!
//! | scope       | roles                              | bindings                    |
//! |-------------|------------------------------------|-----------------------------|
//! | cluster     | view, secret-admin                 | viewers, admins             |
//! | default     | pod-reader                         | read-pods                   |
//! | kube-system | secret-manager, leader-locking     | zeta-binding, alpha-binding |
//! | team-a      |                                    |                             |
//! | team-b      | deployer                           |                             |

use rbac_mapper::core::types::{RawBinding, RawGrant, RawRule, RawSubject};
use rbac_mapper::source::{NamespaceSnapshot, Snapshot};
use std::io::Write;
use tempfile::NamedTempFile;

/// Rule in the core API group
pub fn core_rule(resources: &[&str], verbs: &[&str]) -> RawRule {
    RawRule::new([""], resources.iter().copied(), verbs.iter().copied())
}

/// Rule in the given API groups
pub fn group_rule(groups: &[&str], resources: &[&str], verbs: &[&str]) -> RawRule {
    RawRule::new(
        groups.iter().copied(),
        resources.iter().copied(),
        verbs.iter().copied(),
    )
}

pub fn small_cluster() -> Snapshot {
    Snapshot {
        namespaces: vec![
            NamespaceSnapshot {
                name: "default".to_string(),
                roles: vec![RawGrant::new(
                    "pod-reader",
                    vec![core_rule(&["pods"], &["get", "list"])],
                )],
                bindings: vec![RawBinding::new(
                    "read-pods",
                    "Role",
                    "pod-reader",
                    vec![RawSubject::new("User", "jane", None)],
                )],
            },
            NamespaceSnapshot {
                name: "kube-system".to_string(),
                roles: vec![
                    RawGrant::new(
                        "secret-manager",
                        vec![core_rule(&["secrets"], &["get", "delete"])],
                    ),
                    RawGrant::new(
                        "leader-locking",
                        vec![group_rule(
                            &["coordination.k8s.io"],
                            &["leases"],
                            &["get", "update"],
                        )],
                    ),
                ],
                bindings: vec![
                    RawBinding::new(
                        "zeta-binding",
                        "Role",
                        "leader-locking",
                        vec![RawSubject::new(
                            "ServiceAccount",
                            "controller",
                            Some("kube-system"),
                        )],
                    ),
                    RawBinding::new(
                        "alpha-binding",
                        "Role",
                        "secret-manager",
                        vec![RawSubject::new("Group", "system:masters", Some(""))],
                    ),
                ],
            },
            NamespaceSnapshot {
                name: "team-a".to_string(),
                ..Default::default()
            },
            NamespaceSnapshot {
                name: "team-b".to_string(),
                roles: vec![RawGrant::new(
                    "deployer",
                    vec![group_rule(
                        &["apps"],
                        &["deployments"],
                        &["create", "delete"],
                    )],
                )],
                bindings: vec![],
            },
        ],
        cluster_roles: vec![
            RawGrant::new(
                "view",
                vec![group_rule(
                    &["", "apps"],
                    &["pods", "deployments"],
                    &["get", "list", "watch"],
                )],
            ),
            RawGrant::new(
                "secret-admin",
                vec![core_rule(&["secrets"], &["delete", "get"])],
            ),
        ],
        cluster_bindings: vec![
            RawBinding::new(
                "viewers",
                "ClusterRole",
                "view",
                vec![RawSubject::new("Group", "system:authenticated", None)],
            ),
            RawBinding::new(
                "admins",
                "ClusterRole",
                "secret-admin",
                vec![RawSubject::new("ServiceAccount", "ops", Some("ops"))],
            ),
        ],
    }
}

/// Write `snapshot` as YAML to a temporary file that lives as long as the
/// returned handle
pub fn write_snapshot(snapshot: &Snapshot) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(serde_yaml::to_string(snapshot).unwrap().as_bytes())
        .unwrap();
    file
}
