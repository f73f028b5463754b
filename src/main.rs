//! rbac-mapper - Kubernetes RBAC inventory
//!
//! Collects, filters and summarizes roles and bindings across a cluster

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use rbac_mapper::config::{Cli, Config};
use rbac_mapper::core::cancel::{CancellationSignal, cancel_on_shutdown};
use rbac_mapper::utils::init_logging;
use rbac_mapper::{Mapper, export};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // alternate Display prints the whole cause chain
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli)
        .await
        .context("loading configuration")?;
    init_logging(&config.logging().level, config.logging().json)?;

    let cancel = CancellationSignal::new();
    let shutdown = cancel_on_shutdown(cancel.clone());

    let mapper = Mapper::new(config);
    let outcome = mapper.run(&cancel).await;
    shutdown.abort();
    let result = outcome.context("analyzing RBAC")?;

    info!(
        roles = result.stats.total_roles,
        cluster_roles = result.stats.total_cluster_roles,
        bindings = result.stats.total_bindings,
        truncated = result.truncated,
        "Analysis complete"
    );

    let stdout = std::io::stdout();
    let output = mapper.config().output();
    let color = output.color && stdout.is_terminal();
    export::write_result(&result, output.format, color, stdout.lock())
        .context("writing report")?;
    Ok(())
}
