// src/exec/backend.rs

//! Pluggable job runner abstraction.
//!
//! The service talks to a `JobRunner` instead of spawning processes itself.
//! Production uses [`BoundedExecutor`]; tests can supply a runner that records
//! invocations and returns canned results without touching the OS.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::exec::bounded::BoundedExecutor;
use crate::types::{JobResult, ResolvedCommand};

/// Trait abstracting how a resolved command is executed.
///
/// Implementations must not fail: every outcome is a [`JobResult`].
pub trait JobRunner: Send + Sync {
    fn run_job(
        &self,
        cmd: ResolvedCommand,
        deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = JobResult> + Send + '_>>;
}

impl JobRunner for BoundedExecutor {
    fn run_job(
        &self,
        cmd: ResolvedCommand,
        deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = JobResult> + Send + '_>> {
        Box::pin(self.run(cmd, deadline))
    }
}
