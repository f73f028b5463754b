//! Analyzer core functionality

use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::budget::{Budget, ResultLimit};
use super::builder::AnalyzerBuilder;
use super::result::{AnalysisResult, Stats};
use crate::core::cancel::CancellationSignal;
use crate::core::convert::{convert_binding, convert_grant};
use crate::core::filter::FilterSpec;
use crate::core::traits::{RbacSource, SourceResult};
use crate::core::types::{BindingGrant, PermissionGrant, RawBinding, RawGrant, Scope};
use crate::utils::error::{MapperError, Result};

/// Scope label used in errors and logs for cluster-wide listings
pub const CLUSTER_SCOPE: &str = "cluster";

/// Collects, filters and bounds RBAC records from a data source
#[derive(Clone)]
pub struct Analyzer {
    source: Arc<dyn RbacSource>,
    filter: Option<FilterSpec>,
    limit: ResultLimit,
}

impl Analyzer {
    pub(super) fn new(
        source: Arc<dyn RbacSource>,
        filter: Option<FilterSpec>,
        limit: ResultLimit,
    ) -> Self {
        Self {
            source,
            filter,
            limit,
        }
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn limit(&self) -> ResultLimit {
        self.limit
    }

    pub fn filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    /// Run one full analysis.
    ///
    /// Fetch failures and cancellation abort the run and no partial result
    /// is returned. Hitting the ceiling is not an error: the result comes back
    /// with `truncated` set.
    pub async fn analyze(&self, cancel: &CancellationSignal) -> Result<AnalysisResult> {
        info!("Starting RBAC analysis (limit: {})", self.limit);

        let namespaces = self
            .fetch(cancel, CLUSTER_SCOPE, "list namespaces", self.source.list_namespaces())
            .await?;
        debug!("Source reported {} namespaces", namespaces.len());

        let mut result = AnalysisResult::default();
        let scanned = self.collect_roles(&namespaces, cancel, &mut result).await?;
        self.collect_bindings(&namespaces, cancel, &mut result).await?;

        result.stats = Stats::tally(&result, scanned);

        if result.truncated {
            warn!(
                "Result limit of {} reached, output is incomplete",
                self.limit
            );
        }
        info!(
            "RBAC analysis completed: {} roles, {} cluster roles, {} bindings",
            result.stats.total_roles, result.stats.total_cluster_roles, result.stats.total_bindings
        );
        Ok(result)
    }

    /// Cluster roles, then roles per namespace, against one shared budget.
    /// Returns the number of namespaces whose roles were fetched.
    async fn collect_roles(
        &self,
        namespaces: &[String],
        cancel: &CancellationSignal,
        result: &mut AnalysisResult,
    ) -> Result<usize> {
        let mut budget = Budget::new(self.limit);

        let raw = self
            .fetch(
                cancel,
                CLUSTER_SCOPE,
                "list cluster roles",
                self.source.list_cluster_grants(),
            )
            .await?;
        result.cluster_roles = self.retain_grants(&raw, Scope::Cluster, &mut budget);
        debug!(
            "Retained {} of {} cluster roles",
            result.cluster_roles.len(),
            raw.len()
        );

        let mut scanned = 0;
        if !budget.is_exhausted() {
            for namespace in namespaces {
                let raw = self
                    .fetch(
                        cancel,
                        namespace,
                        "list roles",
                        self.source.list_namespaced_grants(namespace),
                    )
                    .await?;
                scanned += 1;

                let grants = self.retain_grants(&raw, Scope::namespaced(namespace), &mut budget);
                debug!(
                    "Retained {} of {} roles in namespace {}",
                    grants.len(),
                    raw.len(),
                    namespace
                );
                if !grants.is_empty() {
                    result
                        .namespace_roles
                        .entry(namespace.clone())
                        .or_default()
                        .extend(grants);
                }

                if budget.is_exhausted() {
                    debug!("Role budget exhausted at namespace {}", namespace);
                    break;
                }
            }
        }

        result.truncated |= budget.is_exhausted();
        Ok(scanned)
    }

    /// Cluster bindings, then bindings per namespace, against a budget of
    /// their own. Each scope's bindings are sorted by name.
    async fn collect_bindings(
        &self,
        namespaces: &[String],
        cancel: &CancellationSignal,
        result: &mut AnalysisResult,
    ) -> Result<()> {
        let mut budget = Budget::new(self.limit);

        let raw = self
            .fetch(
                cancel,
                CLUSTER_SCOPE,
                "list cluster role bindings",
                self.source.list_cluster_bindings(),
            )
            .await?;
        result.cluster_bindings = self.retain_bindings(&raw, Scope::Cluster, &mut budget);

        if !budget.is_exhausted() {
            for namespace in namespaces {
                let raw = self
                    .fetch(
                        cancel,
                        namespace,
                        "list role bindings",
                        self.source.list_namespaced_bindings(namespace),
                    )
                    .await?;

                let bindings =
                    self.retain_bindings(&raw, Scope::namespaced(namespace), &mut budget);
                if !bindings.is_empty() {
                    let entry = result
                        .namespace_bindings
                        .entry(namespace.clone())
                        .or_default();
                    entry.extend(bindings);
                    sort_by_name(entry);
                }

                if budget.is_exhausted() {
                    debug!("Binding budget exhausted at namespace {}", namespace);
                    break;
                }
            }
        }

        result.truncated |= budget.is_exhausted();
        Ok(())
    }

    fn retain_grants(
        &self,
        raw: &[RawGrant],
        scope: Scope,
        budget: &mut Budget,
    ) -> Vec<PermissionGrant> {
        let converted = raw.iter().map(|grant| convert_grant(grant, scope.clone()));
        budget.retain(converted, |grant| {
            self.filter
                .as_ref()
                .is_none_or(|filter| filter.matches_grant(grant))
        })
    }

    fn retain_bindings(
        &self,
        raw: &[RawBinding],
        scope: Scope,
        budget: &mut Budget,
    ) -> Vec<BindingGrant> {
        let converted = raw.iter().map(|binding| convert_binding(binding, scope.clone()));
        let mut kept = budget.retain(converted, |binding| {
            self.filter
                .as_ref()
                .is_none_or(|filter| filter.matches_binding(binding))
        });
        sort_by_name(&mut kept);
        kept
    }

    /// Await one source call, giving up as soon as cancellation is observed
    async fn fetch<T, F>(
        &self,
        cancel: &CancellationSignal,
        scope: &str,
        operation: &'static str,
        call: F,
    ) -> Result<T>
    where
        F: Future<Output = SourceResult<T>>,
    {
        if cancel.is_cancelled() {
            return Err(MapperError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(MapperError::Cancelled),
            outcome = call => outcome.map_err(|e| MapperError::fetch(scope, operation, e)),
        }
    }
}

fn sort_by_name(bindings: &mut [BindingGrant]) {
    bindings.sort_by(|a, b| a.name.cmp(&b.name));
}
