// src/config/mod.rs

//! Configuration loading and validation for import-gateway.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like absolute binary paths (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{
    ConfigFile, ConfigOverrides, JobsConfig, RawConfigFile, RawJobsSection, RawServerSection,
    ServerConfig,
};
