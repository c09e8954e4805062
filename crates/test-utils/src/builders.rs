#![allow(dead_code)]

use std::path::Path;

use import_gateway::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from the built-in defaults but listens on an ephemeral loopback
/// port so tests never collide.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        let mut config = RawConfigFile::default();
        config.server.listen_addr = "127.0.0.1:0".to_string();
        Self { config }
    }

    pub fn import_bin(mut self, path: impl AsRef<Path>) -> Self {
        self.config.jobs.import_bin = path.as_ref().to_path_buf();
        self
    }

    pub fn reindex_bin(mut self, path: impl AsRef<Path>) -> Self {
        self.config.jobs.reindex_bin = path.as_ref().to_path_buf();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.jobs.timeout_secs = secs;
        self
    }

    pub fn max_workers(mut self, n: usize) -> Self {
        self.config.server.max_workers = n;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
