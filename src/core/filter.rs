//! Verb/resource predicate over permission grants
//!
//! Matching is existential and case-insensitive on each axis. An empty axis
//! places no constraint; a grant matches when any of its rules satisfies both
//! axes.

use crate::core::types::{BindingGrant, PermissionGrant, Rule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Requested verb and resource constraints, case-folded at construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    verbs: HashSet<String>,
    resources: HashSet<String>,
}

impl FilterSpec {
    pub fn new<V, R>(verbs: V, resources: R) -> Self
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Self {
            verbs: fold(verbs),
            resources: fold(resources),
        }
    }

    /// Whether neither axis is constrained
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty() && self.resources.is_empty()
    }

    pub fn verbs(&self) -> &HashSet<String> {
        &self.verbs
    }

    pub fn resources(&self) -> &HashSet<String> {
        &self.resources
    }

    /// A grant matches if at least one of its rules matches
    pub fn matches_grant(&self, grant: &PermissionGrant) -> bool {
        if self.is_empty() {
            return true;
        }
        grant.rules.iter().any(|rule| self.matches_rule(rule))
    }

    /// A rule matches if both its verb and resource axes match
    pub fn matches_rule(&self, rule: &Rule) -> bool {
        axis_matches(&self.verbs, &rule.verbs) && axis_matches(&self.resources, &rule.resources)
    }

    /// Bindings are never narrowed by verb or resource; only the result
    /// ceiling applies to them.
    pub fn matches_binding(&self, _binding: &BindingGrant) -> bool {
        true
    }
}

fn fold<I>(values: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| value.as_ref().to_lowercase())
        .collect()
}

fn axis_matches(wanted: &HashSet<String>, actual: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    actual
        .iter()
        .any(|value| wanted.contains(&value.to_lowercase()))
}
