// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Job-level failures (timeouts, launch errors, unknown commands) are *not*
//! represented here: those are folded into a `JobResult` by the executor and
//! never cross the RPC boundary as errors. See [`crate::exec::JobFailure`].

use thiserror::Error;

use crate::wire::codec::CodecError;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Framing error: {0}")]
    CodecError(#[from] CodecError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GatewayError>;
