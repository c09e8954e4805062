// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, ConfigOverrides, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path, apply CLI overrides and validate.
pub fn load_and_validate(
    path: impl AsRef<Path>,
    overrides: &ConfigOverrides,
) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?.apply_overrides(overrides);
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the effective configuration for the binary.
///
/// - An explicit `--config` path must exist.
/// - Without one, [`default_config_path`] is used if present, otherwise the
///   built-in defaults apply.
pub fn load_or_default(
    explicit: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_and_validate(path, overrides);
    }

    let fallback = default_config_path();
    if fallback.is_file() {
        debug!(path = %fallback.display(), "using default config file");
        return load_and_validate(&fallback, overrides);
    }

    debug!("no config file found; using built-in defaults");
    ConfigFile::try_from(RawConfigFile::default().apply_overrides(overrides))
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("ImportGateway.toml")
}
