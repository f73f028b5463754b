//! # rbac-mapper
//!
//! Inventory, filter and summarize the RBAC permissions of a Kubernetes
//! cluster.
//!
//! Roles, ClusterRoles, RoleBindings and ClusterRoleBindings are collected
//! from every namespace, normalized into a canonical form, optionally
//! filtered by verb and resource, bounded by a result ceiling and folded
//! into a single [`AnalysisResult`] with summary statistics.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rbac_mapper::{Analyzer, CancellationSignal, FilterSpec, SnapshotSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SnapshotSource::from_file("cluster-rbac.yaml").await?;
//!     let analyzer = Analyzer::builder()
//!         .with_source(source)
//!         .with_filter(FilterSpec::new(["delete"], ["secrets"]))
//!         .build()?;
//!
//!     let result = analyzer.analyze(&CancellationSignal::new()).await?;
//!     println!("{} grants can delete secrets", result.total_grants());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod export;
pub mod source;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::analyzer::{AnalysisResult, Analyzer, AnalyzerBuilder, ResultLimit, Stats};
pub use crate::core::cancel::CancellationSignal;
pub use crate::core::filter::FilterSpec;
pub use crate::core::traits::RbacSource;
pub use crate::core::types::{BindingGrant, PermissionGrant, Rule, Scope, Subject};
pub use crate::export::OutputFormat;
pub use crate::source::{KubeSource, SnapshotSource};
pub use crate::utils::error::{MapperError, Result, SourceError};

use crate::source::kube::{Kubeconfig, default_kubeconfig_path};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// A configured mapper run: source selection plus analysis settings
pub struct Mapper {
    config: Config,
}

impl Mapper {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open the configured data source
    ///
    /// A snapshot file wins when set; otherwise the kubeconfig is resolved
    /// from the configured path, `$KUBECONFIG` or `~/.kube/config`.
    pub async fn connect(&self) -> Result<Arc<dyn RbacSource>> {
        let settings = self.config.source();

        if let Some(path) = &settings.snapshot {
            info!("Reading RBAC snapshot from {:?}", path);
            return Ok(Arc::new(SnapshotSource::from_file(path).await?));
        }

        let path = settings
            .kubeconfig
            .clone()
            .or_else(default_kubeconfig_path)
            .ok_or_else(|| MapperError::config("No kubeconfig found; set --kubeconfig"))?;
        debug!("Using kubeconfig {:?}", path);

        let kubeconfig = Kubeconfig::from_file(&path).await?;
        let connection = kubeconfig
            .resolve(settings.context.as_deref())
            .await?
            .with_timeout(Duration::from_secs(settings.timeout));

        let source = KubeSource::from_settings(connection)?.with_page_size(settings.page_size);
        info!("Connecting to {}", source.server());
        Ok(Arc::new(source))
    }

    /// Assemble an analyzer over `source` with the configured filter and limit
    pub fn analyzer(&self, source: Arc<dyn RbacSource>) -> Result<Analyzer> {
        let analysis = self.config.analysis();
        let filter = analysis.filter();

        let mut builder = Analyzer::builder()
            .with_shared_source(source)
            .with_limit(analysis.result_limit()?);
        if !filter.is_empty() {
            builder = builder.with_filter(filter);
        }
        builder.build()
    }

    /// Connect, analyze and return the aggregated result
    pub async fn run(&self, cancel: &CancellationSignal) -> Result<AnalysisResult> {
        let source = self.connect().await?;
        let analyzer = self.analyzer(source)?;
        analyzer.analyze(cancel).await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
