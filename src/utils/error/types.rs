//! Error types for rbac-mapper

use thiserror::Error;

/// Result type alias for rbac-mapper
pub type Result<T> = std::result::Result<T, MapperError>;

/// Main error type for rbac-mapper
#[derive(Error, Debug)]
pub enum MapperError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The analyzer was assembled without a required collaborator
    #[error("Construction error: {0}")]
    Construction(String),

    /// A listing call against the data source failed
    #[error("Failed to {operation} (scope: {scope}): {source}")]
    Fetch {
        /// Namespace name, or `cluster` for cluster-scoped listings
        scope: String,
        operation: &'static str,
        #[source]
        source: SourceError,
    },

    /// Cancellation was observed while analysis was running
    #[error("Analysis cancelled")]
    Cancelled,

    /// Data source setup errors
    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by an RBAC data source
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("API server returned {status} for {url}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Kubeconfig error: {0}")]
    Kubeconfig(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("{0}")]
    Other(String),
}
