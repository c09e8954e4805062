// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `import-gateway`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-gateway",
    version,
    about = "RPC gateway that runs the geographic import and reindex jobs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `ImportGateway.toml` in the current working directory. When
    /// that default file does not exist, built-in defaults are used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Address to listen on, overriding `[server].listen_addr`.
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Maximum number of jobs running at once, overriding `[server].max_workers`.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Per-job deadline in seconds, overriding `[jobs].timeout_secs`.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `IMPORT_GATEWAY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load + validate config, print it, but don't start the server.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
