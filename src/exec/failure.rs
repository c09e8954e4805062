// src/exec/failure.rs

//! Typed job failures and their fixed response encoding.
//!
//! | failure          | exit_code | stdout | stderr                     |
//! |------------------|-----------|--------|----------------------------|
//! | `UnknownCommand` | 1         | ""     | "Unknown command"          |
//! | `Timeout`        | 124       | ""     | "Import command timed out" |
//! | `LaunchFailure`  | 1         | ""     | error description          |
//!
//! A non-zero exit from the external binary is not a failure here; it is
//! passed through as a completed [`JobResult`].

use thiserror::Error;

use crate::types::{JobKind, JobResult};

pub const TIMEOUT_EXIT_CODE: i32 = 124;
pub const FAILURE_EXIT_CODE: i32 = 1;

pub const TIMEOUT_MESSAGE: &str = "Import command timed out";
pub const UNKNOWN_COMMAND_MESSAGE: &str = "Unknown command";

/// Returned by the resolver for a kind it has no binary for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}: {}", UNKNOWN_COMMAND_MESSAGE, .kind)]
pub struct UnknownCommand {
    pub kind: JobKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobFailure {
    #[error("{}", UNKNOWN_COMMAND_MESSAGE)]
    UnknownCommand,

    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    #[error("{0}")]
    LaunchFailure(String),
}

impl JobFailure {
    pub fn exit_code(&self) -> i32 {
        match self {
            JobFailure::Timeout => TIMEOUT_EXIT_CODE,
            JobFailure::UnknownCommand | JobFailure::LaunchFailure(_) => FAILURE_EXIT_CODE,
        }
    }
}

impl From<UnknownCommand> for JobFailure {
    fn from(_: UnknownCommand) -> Self {
        JobFailure::UnknownCommand
    }
}

impl From<JobFailure> for JobResult {
    fn from(failure: JobFailure) -> Self {
        JobResult {
            stdout: String::new(),
            exit_code: failure.exit_code(),
            stderr: failure.to_string(),
        }
    }
}
