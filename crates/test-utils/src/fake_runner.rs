use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use import_gateway::exec::JobRunner;
use import_gateway::types::{JobResult, ResolvedCommand};

/// A fake runner that:
/// - records every command it was asked to run
/// - answers with a fixed result, optionally after a delay.
#[derive(Clone)]
pub struct FakeRunner {
    calls: Arc<Mutex<Vec<ResolvedCommand>>>,
    result: JobResult,
    delay: Duration,
}

impl FakeRunner {
    pub fn new(result: JobResult) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result,
            delay: Duration::ZERO,
        }
    }

    pub fn succeeding(stdout: &str) -> Self {
        Self::new(JobResult::completed(stdout.to_string(), String::new(), 0))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<ResolvedCommand> {
        self.calls.lock().unwrap().clone()
    }
}

impl JobRunner for FakeRunner {
    fn run_job(
        &self,
        cmd: ResolvedCommand,
        _deadline: Duration,
    ) -> Pin<Box<dyn Future<Output = JobResult> + Send + '_>> {
        self.calls.lock().unwrap().push(cmd);
        let result = self.result.clone();
        let delay = self.delay;

        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}
