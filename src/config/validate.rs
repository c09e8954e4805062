// src/config/validate.rs

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::config::model::{ConfigFile, JobsConfig, RawConfigFile, ServerConfig};
use crate::errors::{GatewayError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = GatewayError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let server = validate_server(&raw)?;
        let jobs = validate_jobs(&raw)?;
        Ok(ConfigFile::new_unchecked(server, jobs))
    }
}

fn validate_server(cfg: &RawConfigFile) -> Result<ServerConfig> {
    let listen_addr: SocketAddr = cfg.server.listen_addr.trim().parse().map_err(|e| {
        GatewayError::ConfigError(format!(
            "[server].listen_addr '{}' is not a socket address: {e}",
            cfg.server.listen_addr
        ))
    })?;

    if cfg.server.max_workers == 0 {
        return Err(GatewayError::ConfigError(
            "[server].max_workers must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(ServerConfig {
        listen_addr,
        max_workers: cfg.server.max_workers,
    })
}

fn validate_jobs(cfg: &RawConfigFile) -> Result<JobsConfig> {
    ensure_absolute("import_bin", &cfg.jobs.import_bin)?;
    ensure_absolute("reindex_bin", &cfg.jobs.reindex_bin)?;

    if cfg.jobs.timeout_secs == 0 {
        return Err(GatewayError::ConfigError(
            "[jobs].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(JobsConfig {
        import_bin: cfg.jobs.import_bin.clone(),
        reindex_bin: cfg.jobs.reindex_bin.clone(),
        timeout: Duration::from_secs(cfg.jobs.timeout_secs),
    })
}

// Binaries are launched without a shell or PATH lookup.
fn ensure_absolute(key: &str, path: &Path) -> Result<()> {
    if !path.is_absolute() {
        return Err(GatewayError::ConfigError(format!(
            "[jobs].{key} must be an absolute path (got '{}')",
            path.display()
        )));
    }
    Ok(())
}
