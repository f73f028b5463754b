//! REST client for the RBAC listing endpoints

use async_trait::async_trait;
use reqwest::{Certificate, Client, Identity};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

use super::kubeconfig::{ConnectionSettings, Kubeconfig};
use super::wire::{Namespace, ObjectList, Role, RoleBinding, Status};
use crate::core::traits::{RbacSource, SourceResult};
use crate::core::types::{RawBinding, RawGrant};
use crate::utils::error::SourceError;

/// Items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 500;

const RBAC_API: &str = "apis/rbac.authorization.k8s.io/v1";

/// Lists RBAC objects from a live API server
#[derive(Debug, Clone)]
pub struct KubeSource {
    client: Client,
    base: Url,
    token: Option<String>,
    basic_auth: Option<(String, String)>,
    page_size: u32,
}

impl KubeSource {
    /// Connect using a kubeconfig file and an optional context override
    pub async fn from_kubeconfig<P: AsRef<Path>>(
        path: P,
        context: Option<&str>,
    ) -> SourceResult<Self> {
        let kubeconfig = Kubeconfig::from_file(path).await?;
        let settings = kubeconfig.resolve(context).await?;
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: ConnectionSettings) -> SourceResult<Self> {
        let mut builder = Client::builder().timeout(settings.timeout);

        if let Some(ca) = &settings.ca_pem {
            let certificate = Certificate::from_pem(ca).map_err(|e| {
                SourceError::kubeconfig(format!("invalid certificate authority: {}", e))
            })?;
            builder = builder.add_root_certificate(certificate);
        }
        if let Some(pem) = &settings.identity_pem {
            let identity = Identity::from_pem(pem).map_err(|e| {
                SourceError::kubeconfig(format!("invalid client certificate or key: {}", e))
            })?;
            builder = builder.identity(identity);
        }
        if settings.insecure_skip_tls_verify {
            warn!("TLS verification disabled for {}", settings.server);
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| SourceError::other(format!("failed to build HTTP client: {}", e)))?;

        // a trailing slash keeps any path prefix of the server URL on join
        let mut base = settings.server;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            base,
            token: settings.token,
            basic_auth: settings.basic_auth,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Override the number of items requested per page
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn server(&self) -> &Url {
        &self.base
    }

    /// Fetch every page of a list endpoint
    async fn list<T: DeserializeOwned>(&self, path: &str) -> SourceResult<Vec<T>> {
        let url = self.base.join(path).map_err(|e| {
            SourceError::other(format!("invalid API path '{}': {}", path, e))
        })?;

        let mut items = Vec::new();
        let mut continue_token: Option<String> = None;
        loop {
            let page: ObjectList<T> = self.get_page(&url, continue_token.as_deref()).await?;
            items.extend(page.items.unwrap_or_default());

            match page.metadata.continue_token.filter(|token| !token.is_empty()) {
                Some(token) => continue_token = Some(token),
                None => break,
            }
        }

        debug!("Listed {} items from {}", items.len(), url);
        Ok(items)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        url: &Url,
        continue_token: Option<&str>,
    ) -> SourceResult<ObjectList<T>> {
        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("limit", self.page_size.to_string())]);
        if let Some(token) = continue_token {
            request = request.query(&[("continue", token)]);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        } else if let Some((username, password)) = &self.basic_auth {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::network(url.as_str(), e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::network(url.as_str(), e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Status>(&body)
                .map(|s| s.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or(body);
            return Err(SourceError::api(url.as_str(), status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| SourceError::decode(url.as_str(), e.to_string()))
    }
}

#[async_trait]
impl RbacSource for KubeSource {
    async fn list_namespaces(&self) -> SourceResult<Vec<String>> {
        let namespaces: Vec<Namespace> = self.list("api/v1/namespaces").await?;
        Ok(namespaces.into_iter().map(|ns| ns.metadata.name).collect())
    }

    async fn list_cluster_grants(&self) -> SourceResult<Vec<RawGrant>> {
        let roles: Vec<Role> = self.list(&format!("{}/clusterroles", RBAC_API)).await?;
        Ok(roles.into_iter().map(RawGrant::from).collect())
    }

    async fn list_namespaced_grants(&self, namespace: &str) -> SourceResult<Vec<RawGrant>> {
        let path = format!("{}/namespaces/{}/roles", RBAC_API, namespace);
        let roles: Vec<Role> = self.list(&path).await?;
        Ok(roles.into_iter().map(RawGrant::from).collect())
    }

    async fn list_cluster_bindings(&self) -> SourceResult<Vec<RawBinding>> {
        let bindings: Vec<RoleBinding> =
            self.list(&format!("{}/clusterrolebindings", RBAC_API)).await?;
        Ok(bindings.into_iter().map(RawBinding::from).collect())
    }

    async fn list_namespaced_bindings(&self, namespace: &str) -> SourceResult<Vec<RawBinding>> {
        let path = format!("{}/namespaces/{}/rolebindings", RBAC_API, namespace);
        let bindings: Vec<RoleBinding> = self.list(&path).await?;
        Ok(bindings.into_iter().map(RawBinding::from).collect())
    }
}
