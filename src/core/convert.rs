//! Conversion of raw source records into normalized entities

use crate::core::types::{
    BindingGrant, PermissionGrant, RawBinding, RawGrant, RawRule, RawSubject, RoleRef, Rule,
    Scope, Subject,
};

/// Expand a rule's API-group × resource matrix into qualified resource names.
///
/// Groups are walked in declaration order with resources inner; the core
/// group (`""`) yields the bare resource name. Nothing is de-duplicated.
pub fn normalize_rule(rule: &RawRule) -> Rule {
    let resources = if rule.api_groups.is_empty() {
        rule.resources.clone()
    } else {
        let mut qualified = Vec::with_capacity(rule.api_groups.len() * rule.resources.len());
        for group in &rule.api_groups {
            for resource in &rule.resources {
                if group.is_empty() {
                    qualified.push(resource.clone());
                } else {
                    qualified.push(format!("{}/{}", group, resource));
                }
            }
        }
        qualified
    };

    Rule {
        resources,
        verbs: rule.verbs.clone(),
    }
}

pub fn convert_grant(raw: &RawGrant, scope: Scope) -> PermissionGrant {
    PermissionGrant {
        name: raw.name.clone(),
        scope,
        rules: raw.rules.iter().map(normalize_rule).collect(),
    }
}

pub fn convert_binding(raw: &RawBinding, scope: Scope) -> BindingGrant {
    BindingGrant {
        name: raw.name.clone(),
        scope,
        role_ref: RoleRef {
            kind: raw.role_ref_kind.clone(),
            name: raw.role_ref_name.clone(),
        },
        subjects: raw.subjects.iter().map(convert_subject).collect(),
    }
}

fn convert_subject(raw: &RawSubject) -> Subject {
    Subject {
        kind: raw.kind.clone(),
        name: raw.name.clone(),
        namespace: raw.namespace.clone().filter(|ns| !ns.is_empty()),
    }
}
