//! Kubeconfig loading and context resolution

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::core::traits::SourceResult;
use crate::utils::error::SourceError;

/// Parsed kubeconfig file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Kubeconfig {
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
    #[serde(default)]
    pub users: Vec<NamedUser>,
    #[serde(default)]
    pub contexts: Vec<NamedContext>,
    #[serde(default)]
    pub current_context: Option<String>,
    /// Directory relative file references are resolved against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: ClusterEntry,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClusterEntry {
    pub server: String,
    #[serde(default)]
    pub certificate_authority: Option<PathBuf>,
    #[serde(default)]
    pub certificate_authority_data: Option<String>,
    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedUser {
    pub name: String,
    #[serde(default)]
    pub user: UserEntry,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserEntry {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub token_file: Option<PathBuf>,
    #[serde(default)]
    pub client_certificate: Option<PathBuf>,
    #[serde(default)]
    pub client_certificate_data: Option<String>,
    #[serde(default)]
    pub client_key: Option<PathBuf>,
    #[serde(default)]
    pub client_key_data: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Credential plugin; only detected so it can be reported
    #[serde(default)]
    pub exec: Option<serde_yaml::Value>,
    /// Legacy auth provider; only detected so it can be reported
    #[serde(default)]
    pub auth_provider: Option<serde_yaml::Value>,
}

impl UserEntry {
    /// Refuse credential mechanisms that need an external helper
    fn check_supported(&self, user_name: &str) -> SourceResult<()> {
        if self.exec.is_some() {
            return Err(SourceError::kubeconfig(format!(
                "user '{}': exec credential plugins are not supported; use a token or client certificate",
                user_name
            )));
        }
        if self.auth_provider.is_some() {
            return Err(SourceError::kubeconfig(format!(
                "user '{}': auth-provider entries are not supported; use a token or client certificate",
                user_name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: ContextEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextEntry {
    pub cluster: String,
    #[serde(default)]
    pub user: Option<String>,
}

/// Everything needed to open a connection to one API server
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub server: Url,
    /// PEM bundle of extra trust roots
    pub ca_pem: Option<Vec<u8>>,
    /// PEM client certificate followed by its private key
    pub identity_pem: Option<Vec<u8>>,
    pub token: Option<String>,
    pub basic_auth: Option<(String, String)>,
    pub insecure_skip_tls_verify: bool,
    pub timeout: Duration,
}

impl ConnectionSettings {
    /// Plain settings for `server`, no credentials
    pub fn new(server: &str) -> SourceResult<Self> {
        let server = Url::parse(server).map_err(|e| {
            SourceError::kubeconfig(format!("invalid server URL '{}': {}", server, e))
        })?;
        Ok(Self {
            server,
            ca_pem: None,
            identity_pem: None,
            token: None,
            basic_auth: None,
            insecure_skip_tls_verify: false,
            timeout: Duration::from_secs(30),
        })
    }

    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `$KUBECONFIG` (first entry), else `~/.kube/config`
pub fn default_kubeconfig_path() -> Option<PathBuf> {
    if let Ok(value) = std::env::var("KUBECONFIG") {
        if let Some(first) = std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()) {
            return Some(first);
        }
    }
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".kube").join("config"))
}

impl Kubeconfig {
    /// Load a kubeconfig file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let path = path.as_ref();
        debug!("Loading kubeconfig from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SourceError::kubeconfig(format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn parse(content: &str) -> SourceResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| SourceError::kubeconfig(format!("failed to parse kubeconfig: {}", e)))
    }

    /// Resolve `context`, or the current context when `None`, into
    /// connection settings. Referenced files are read here.
    pub async fn resolve(&self, context: Option<&str>) -> SourceResult<ConnectionSettings> {
        let context_name = context
            .map(str::to_string)
            .or_else(|| self.current_context.clone())
            .ok_or_else(|| SourceError::kubeconfig("no context given and no current-context set"))?;

        let context = self
            .contexts
            .iter()
            .find(|c| c.name == context_name)
            .ok_or_else(|| {
                SourceError::kubeconfig(format!("context '{}' not found", context_name))
            })?;

        let cluster = self
            .clusters
            .iter()
            .find(|c| c.name == context.context.cluster)
            .ok_or_else(|| {
                SourceError::kubeconfig(format!(
                    "cluster '{}' referenced by context '{}' not found",
                    context.context.cluster, context_name
                ))
            })?;

        let user = match &context.context.user {
            Some(user_name) => self
                .users
                .iter()
                .find(|u| &u.name == user_name)
                .map(|u| u.user.clone())
                .ok_or_else(|| {
                    SourceError::kubeconfig(format!(
                        "user '{}' referenced by context '{}' not found",
                        user_name, context_name
                    ))
                })?,
            None => UserEntry::default(),
        };
        if let Some(user_name) = &context.context.user {
            user.check_supported(user_name)?;
        }

        debug!(
            "Using context '{}' (cluster '{}')",
            context_name, cluster.name
        );

        let mut settings = ConnectionSettings::new(&cluster.cluster.server)?;
        settings.insecure_skip_tls_verify = cluster.cluster.insecure_skip_tls_verify;
        settings.ca_pem = self
            .inline_or_file(
                cluster.cluster.certificate_authority_data.as_deref(),
                cluster.cluster.certificate_authority.as_deref(),
                "certificate-authority",
            )
            .await?;

        let cert = self
            .inline_or_file(
                user.client_certificate_data.as_deref(),
                user.client_certificate.as_deref(),
                "client-certificate",
            )
            .await?;
        let key = self
            .inline_or_file(
                user.client_key_data.as_deref(),
                user.client_key.as_deref(),
                "client-key",
            )
            .await?;
        settings.identity_pem = match (cert, key) {
            (Some(mut cert), Some(key)) => {
                cert.push(b'\n');
                cert.extend(key);
                Some(cert)
            }
            (None, None) => None,
            _ => {
                return Err(SourceError::kubeconfig(
                    "client certificate and client key must be given together",
                ));
            }
        };

        settings.token = match (&user.token, &user.token_file) {
            (Some(token), _) => Some(token.clone()),
            (None, Some(path)) => {
                let path = self.resolve_path(path);
                let token = tokio::fs::read_to_string(&path).await.map_err(|e| {
                    SourceError::kubeconfig(format!(
                        "failed to read token-file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Some(token.trim().to_string())
            }
            (None, None) => None,
        };

        if let (Some(username), Some(password)) = (&user.username, &user.password) {
            settings.basic_auth = Some((username.clone(), password.clone()));
        }

        Ok(settings)
    }

    async fn inline_or_file(
        &self,
        data: Option<&str>,
        path: Option<&Path>,
        field: &str,
    ) -> SourceResult<Option<Vec<u8>>> {
        if let Some(data) = data {
            let decoded = BASE64.decode(data.trim()).map_err(|e| {
                SourceError::kubeconfig(format!("{}-data is not valid base64: {}", field, e))
            })?;
            return Ok(Some(decoded));
        }
        match path {
            Some(path) => {
                let path = self.resolve_path(path);
                tokio::fs::read(&path).await.map(Some).map_err(|e| {
                    SourceError::kubeconfig(format!(
                        "failed to read {} {}: {}",
                        field,
                        path.display(),
                        e
                    ))
                })
            }
            None => Ok(None),
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
