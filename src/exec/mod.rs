// src/exec/mod.rs

//! Job execution layer.
//!
//! - [`resolver`] turns a request into a concrete command line.
//! - [`bounded`] launches that command with a deadline and captures output.
//! - [`failure`] defines the typed failures and their response encoding.
//! - [`backend`] provides the `JobRunner` trait the service depends on, so
//!   tests can swap in a fake runner.

pub mod backend;
pub mod bounded;
pub mod failure;
pub mod resolver;

pub use backend::JobRunner;
pub use bounded::BoundedExecutor;
pub use failure::{
    FAILURE_EXIT_CODE, JobFailure, TIMEOUT_EXIT_CODE, TIMEOUT_MESSAGE, UNKNOWN_COMMAND_MESSAGE,
    UnknownCommand,
};
pub use resolver::CommandResolver;
