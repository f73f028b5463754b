//! Scripted data source
//!
//! Serves a [`Snapshot`] like [`SnapshotSource`] does, records every call
//! and can be told to fail one listing.

use async_trait::async_trait;
use rbac_mapper::core::traits::{RbacSource, SourceResult};
use rbac_mapper::core::types::{RawBinding, RawGrant};
use rbac_mapper::source::{Snapshot, SnapshotSource};
use rbac_mapper::SourceError;
use std::sync::Mutex;

pub struct FakeSource {
    inner: SnapshotSource,
    fail_on: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: SnapshotSource::new(snapshot),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail the call recorded as `call`, e.g. `roles:team-a` or `namespaces`
    pub fn failing_on(mut self, call: &str) -> Self {
        self.fail_on = Some(call.to_string());
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> SourceResult<()> {
        self.calls.lock().unwrap().push(call.clone());
        if self.fail_on.as_deref() == Some(call.as_str()) {
            return Err(SourceError::api(
                format!("https://cluster.test/{}", call),
                503,
                "service unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RbacSource for FakeSource {
    async fn list_namespaces(&self) -> SourceResult<Vec<String>> {
        self.record("namespaces".to_string())?;
        self.inner.list_namespaces().await
    }

    async fn list_cluster_grants(&self) -> SourceResult<Vec<RawGrant>> {
        self.record("clusterroles".to_string())?;
        self.inner.list_cluster_grants().await
    }

    async fn list_namespaced_grants(&self, namespace: &str) -> SourceResult<Vec<RawGrant>> {
        self.record(format!("roles:{}", namespace))?;
        self.inner.list_namespaced_grants(namespace).await
    }

    async fn list_cluster_bindings(&self) -> SourceResult<Vec<RawBinding>> {
        self.record("clusterrolebindings".to_string())?;
        self.inner.list_cluster_bindings().await
    }

    async fn list_namespaced_bindings(&self, namespace: &str) -> SourceResult<Vec<RawBinding>> {
        self.record(format!("rolebindings:{}", namespace))?;
        self.inner.list_namespaced_bindings(namespace).await
    }
}
