// src/config/model.rs

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:50051";
pub const DEFAULT_MAX_WORKERS: usize = 2;
pub const DEFAULT_IMPORT_BIN: &str = "/code/pelias/openstreetmap/bin/import";
pub const DEFAULT_REINDEX_BIN: &str = "/code/pelias/openstreetmap/bin/reindex";
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Configuration exactly as read from TOML, before validation.
///
/// ```toml
/// [server]
/// listen_addr = "0.0.0.0:50051"
/// max_workers = 2
///
/// [jobs]
/// import_bin = "/code/pelias/openstreetmap/bin/import"
/// reindex_bin = "/code/pelias/openstreetmap/bin/reindex"
/// timeout_secs = 3600
/// ```
///
/// All sections and keys are optional and have defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: RawServerSection,

    #[serde(default)]
    pub jobs: RawJobsSection,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawServerSection {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Upper bound on jobs running at the same time.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

impl Default for RawServerSection {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_workers: default_max_workers(),
        }
    }
}

/// `[jobs]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawJobsSection {
    #[serde(default = "default_import_bin")]
    pub import_bin: PathBuf,

    #[serde(default = "default_reindex_bin")]
    pub reindex_bin: PathBuf,

    /// Deadline for a single job, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RawJobsSection {
    fn default() -> Self {
        Self {
            import_bin: default_import_bin(),
            reindex_bin: default_reindex_bin(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_import_bin() -> PathBuf {
    PathBuf::from(DEFAULT_IMPORT_BIN)
}

fn default_reindex_bin() -> PathBuf {
    PathBuf::from(DEFAULT_REINDEX_BIN)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen_addr: Option<String>,
    pub max_workers: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl RawConfigFile {
    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(addr) = &overrides.listen_addr {
            self.server.listen_addr = addr.clone();
        }
        if let Some(n) = overrides.max_workers {
            self.server.max_workers = n;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.jobs.timeout_secs = secs;
        }
        self
    }
}

/// Validated configuration. Read-only after startup and shared by every
/// request.
///
/// Only constructible through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub server: ServerConfig,
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub max_workers: usize,
}

#[derive(Debug, Clone)]
pub struct JobsConfig {
    pub import_bin: PathBuf,
    pub reindex_bin: PathBuf,
    pub timeout: Duration,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(server: ServerConfig, jobs: JobsConfig) -> Self {
        Self { server, jobs }
    }
}
