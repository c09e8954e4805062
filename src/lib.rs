// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod server;
pub mod service;
pub mod types;
pub mod wire;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, ConfigOverrides, load_or_default};
use crate::server::Server;
use crate::service::ImportService;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the import service (resolver + bounded executor)
/// - the TCP server and its worker pool
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        listen_addr: args.listen.clone(),
        max_workers: args.workers,
        timeout_secs: args.timeout_secs,
    };
    let cfg = load_or_default(args.config.as_deref().map(Path::new), &overrides)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let service = Arc::new(ImportService::from_config(&cfg));
    let server = Server::bind(cfg.server.listen_addr, service, cfg.server.max_workers).await?;

    info!(
        addr = %server.local_addr()?,
        max_workers = cfg.server.max_workers,
        timeout_secs = cfg.jobs.timeout.as_secs(),
        "starting RPC server"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    server.serve_until(shutdown).await?;
    info!("server stopped");
    Ok(())
}

/// Print the effective configuration without serving.
fn print_dry_run(cfg: &ConfigFile) {
    println!("import-gateway dry-run");
    println!("  server.listen_addr = {}", cfg.server.listen_addr);
    println!("  server.max_workers = {}", cfg.server.max_workers);
    println!("  jobs.import_bin    = {}", cfg.jobs.import_bin.display());
    println!("  jobs.reindex_bin   = {}", cfg.jobs.reindex_bin.display());
    println!("  jobs.timeout_secs  = {}", cfg.jobs.timeout.as_secs());

    debug!("dry-run complete (server not started)");
}
