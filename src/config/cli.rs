//! Command-line arguments

use clap::Parser;
use std::ffi::OsStr;
use std::path::PathBuf;

use super::models::*;
use crate::export::OutputFormat;

/// Inventory and summarize Kubernetes RBAC roles and bindings
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "rbac-mapper", version, about, long_about = None)]
pub struct Cli {
    /// YAML configuration file; command-line flags override it
    #[arg(long, env = "RBAC_MAPPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to kubeconfig file [default: $KUBECONFIG or ~/.kube/config]
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use [default: current context]
    #[arg(long)]
    pub context: Option<String>,

    /// Analyze an offline YAML/JSON snapshot instead of a live cluster
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output-format", value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Filter by verbs (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub verbs: Option<Vec<String>>,

    /// Filter by resources (comma-separated, e.g. pods,apps/deployments)
    #[arg(long, value_delimiter = ',')]
    pub resources: Option<Vec<String>>,

    /// Limit the number of results (0 for the default of 1000, -1 for no limit)
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Disable coloured text output (also disabled by a non-empty NO_COLOR)
    #[arg(long)]
    pub no_color: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log filter, e.g. info or rbac_mapper=debug
    #[arg(long, env = "RBAC_MAPPER_LOG")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Configuration carrying only what was given on the command line
    pub fn to_config(&self) -> MapperConfig {
        self.apply(MapperConfig::default())
    }

    /// Overlay the flags that were given onto `config`
    ///
    /// Every flag that was passed wins, including one passed with its
    /// default value.
    pub fn apply(&self, mut config: MapperConfig) -> MapperConfig {
        let source = &mut config.source;
        if let Some(kubeconfig) = &self.kubeconfig {
            source.kubeconfig = Some(kubeconfig.clone());
        }
        if let Some(context) = &self.context {
            source.context = Some(context.clone());
        }
        if let Some(snapshot) = &self.snapshot {
            source.snapshot = Some(snapshot.clone());
        }
        if let Some(timeout) = self.timeout {
            source.timeout = timeout;
        }

        let analysis = &mut config.analysis;
        if let Some(verbs) = &self.verbs {
            analysis.verbs = verbs.clone();
        }
        if let Some(resources) = &self.resources {
            analysis.resources = resources.clone();
        }
        if let Some(limit) = self.limit {
            analysis.limit = limit;
        }

        if let Some(format) = self.output_format {
            config.output.format = format;
        }
        if !color_allowed(self.no_color, std::env::var_os("NO_COLOR").as_deref()) {
            config.output.color = false;
        }

        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.log_json {
            config.logging.json = true;
        }

        config
    }
}

/// Colour stays allowed unless `--no-color` was given or `NO_COLOR` holds
/// any non-empty value
fn color_allowed(no_color_flag: bool, no_color_env: Option<&OsStr>) -> bool {
    !no_color_flag && no_color_env.is_none_or(|value| value.is_empty())
}
