// src/exec/bounded.rs

//! Runs one resolved command with a deadline and captures its output.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::exec::failure::JobFailure;
use crate::types::{JobResult, ResolvedCommand};

/// Launches external jobs and waits for them, bounded by a deadline.
///
/// Stateless: every call gets its own child process and its own buffers, so a
/// single executor can serve any number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedExecutor;

impl BoundedExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Run `cmd` to completion or until `deadline` elapses.
    ///
    /// Never fails: timeouts and launch errors are encoded in the returned
    /// [`JobResult`]. On timeout the child is killed and reaped before this
    /// returns, and any output it produced is discarded.
    pub async fn run(&self, cmd: ResolvedCommand, deadline: Duration) -> JobResult {
        match run_inner(&cmd, deadline).await {
            Ok(result) => {
                info!(
                    cmd = %cmd.executable.display(),
                    exit_code = result.exit_code,
                    stdout_bytes = result.stdout.len(),
                    stderr_bytes = result.stderr.len(),
                    "job process exited"
                );
                result
            }
            Err(failure) => {
                match &failure {
                    JobFailure::Timeout => warn!(
                        cmd = %cmd.executable.display(),
                        deadline_secs = deadline.as_secs_f64(),
                        "job exceeded deadline; process killed"
                    ),
                    other => error!(
                        cmd = %cmd.executable.display(),
                        error = %other,
                        "job execution error"
                    ),
                }
                JobResult::from(failure)
            }
        }
    }
}

async fn run_inner(cmd: &ResolvedCommand, deadline: Duration) -> Result<JobResult, JobFailure> {
    let mut child = Command::new(&cmd.executable)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            JobFailure::LaunchFailure(format!(
                "failed to launch {}: {e}",
                cmd.executable.display()
            ))
        })?;

    debug!(pid = ?child.id(), cmd = %cmd.display_line(), "job process spawned");

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| JobFailure::LaunchFailure("child stdout was not captured".into()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| JobFailure::LaunchFailure("child stderr was not captured".into()))?;

    // The deadline covers draining both pipes as well as the exit itself.
    let outcome = {
        let collect = async {
            tokio::try_join!(child.wait(), read_all(stdout), read_all(stderr))
        };
        timeout(deadline, collect).await
    };

    match outcome {
        Ok(Ok((status, out, err))) => Ok(JobResult::completed(
            decode_text(cmd, "stdout", out)?,
            decode_text(cmd, "stderr", err)?,
            exit_code(status),
        )),
        Ok(Err(e)) => {
            terminate(&mut child).await;
            Err(JobFailure::LaunchFailure(format!(
                "failed while waiting for {}: {e}",
                cmd.executable.display()
            )))
        }
        Err(_elapsed) => {
            terminate(&mut child).await;
            Err(JobFailure::Timeout)
        }
    }
}

async fn read_all<R: AsyncRead + Unpin>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// Kill the child and wait for it so no process outlives the call.
async fn terminate(child: &mut Child) {
    let pid = child.id();
    if let Err(e) = child.kill().await {
        warn!(?pid, error = %e, "failed to kill job process");
    }
}

// Output that is not valid UTF-8 fails the whole job; nothing is replaced.
fn decode_text(
    cmd: &ResolvedCommand,
    stream: &str,
    bytes: Vec<u8>,
) -> Result<String, JobFailure> {
    String::from_utf8(bytes).map_err(|e| {
        JobFailure::LaunchFailure(format!(
            "failed to decode {stream} of {} as UTF-8: {e}",
            cmd.executable.display()
        ))
    })
}

fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => signal_exit_code(status),
    }
}

// Terminated by a signal: report `-signal`.
#[cfg(unix)]
fn signal_exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|sig| -sig).unwrap_or(-1)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: ExitStatus) -> i32 {
    -1
}
