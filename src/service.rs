// src/service.rs

//! The `RunImport` handler: resolve, execute, answer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{Instrument, info, info_span, warn};

use crate::config::ConfigFile;
use crate::exec::{BoundedExecutor, CommandResolver, JobFailure, JobRunner};
use crate::types::{JobRequest, JobResult};
use crate::wire::{ImportRequest, ImportResponse};

/// Stateless apart from read-only configuration; safe to share across
/// connections behind an `Arc`.
pub struct ImportService {
    resolver: CommandResolver,
    runner: Arc<dyn JobRunner>,
    deadline: Duration,
    next_request_id: AtomicU64,
}

impl ImportService {
    pub fn new(resolver: CommandResolver, runner: Arc<dyn JobRunner>, deadline: Duration) -> Self {
        Self {
            resolver,
            runner,
            deadline,
            next_request_id: AtomicU64::new(0),
        }
    }

    /// Production wiring: real process executor, binaries and deadline from
    /// config.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(
            CommandResolver::from_config(&cfg.jobs),
            Arc::new(BoundedExecutor::new()),
            cfg.jobs.timeout,
        )
    }

    /// Handle one RPC. Always produces a well-formed response.
    pub async fn run_import(&self, request: ImportRequest) -> ImportResponse {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed) + 1;
        let span = info_span!("run_import", request_id);

        self.handle(JobRequest::from(request))
            .instrument(span)
            .await
            .into()
    }

    /// Typed entry point behind [`run_import`](Self::run_import).
    pub async fn handle(&self, request: JobRequest) -> JobResult {
        info!(command = %request.kind, args = ?request.args, "received import request");

        let cmd = match self.resolver.resolve(&request) {
            Ok(cmd) => cmd,
            Err(unknown) => {
                warn!(error = %unknown, "rejecting request without launching a process");
                return JobFailure::from(unknown).into();
            }
        };

        info!(cmd = %cmd.display_line(), "executing");
        self.runner.run_job(cmd, self.deadline).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use crate::types::{JobKind, ResolvedCommand};

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(ResolvedCommand, Duration)>>,
    }

    impl JobRunner for RecordingRunner {
        fn run_job(
            &self,
            cmd: ResolvedCommand,
            deadline: Duration,
        ) -> Pin<Box<dyn Future<Output = JobResult> + Send + '_>> {
            self.calls.lock().unwrap().push((cmd, deadline));
            Box::pin(async { JobResult::completed("done".into(), String::new(), 0) })
        }
    }

    fn service(runner: Arc<RecordingRunner>) -> ImportService {
        ImportService::new(
            CommandResolver::new("/bin/import", "/bin/reindex"),
            runner,
            Duration::from_secs(42),
        )
    }

    #[tokio::test]
    async fn import_request_runs_with_configured_deadline() {
        let runner = Arc::new(RecordingRunner::default());
        let svc = service(runner.clone());

        let result = svc
            .handle(JobRequest::new(JobKind::Import, ["--source", "region.osm"]))
            .await;
        assert_eq!(result, JobResult::completed("done".into(), String::new(), 0));

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.executable, std::path::Path::new("/bin/import"));
        assert_eq!(calls[0].0.args, vec!["--source", "region.osm"]);
        assert_eq!(calls[0].1, Duration::from_secs(42));
    }

    #[tokio::test]
    async fn unknown_command_never_reaches_runner() {
        let runner = Arc::new(RecordingRunner::default());
        let svc = service(runner.clone());

        let response = svc
            .run_import(ImportRequest {
                command: 99,
                args: vec!["--source".into()],
            })
            .await;

        assert_eq!(
            response,
            ImportResponse {
                stdout: String::new(),
                stderr: "Unknown command".into(),
                exit_code: 1,
            }
        );
        assert!(runner.calls.lock().unwrap().is_empty());
    }
}
