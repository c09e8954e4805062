// src/types.rs

//! Core job types shared by the resolver, the executor and the service.
//!
//! All of these live for a single request only.

use std::fmt;
use std::path::PathBuf;

/// Which external job a request asks for.
///
/// `Unknown` keeps the raw wire value so it can be logged; it is rejected by
/// the resolver and never reaches the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Import,
    Reindex,
    Unknown(i32),
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Import => f.write_str("IMPORT"),
            JobKind::Reindex => f.write_str("REINDEX"),
            JobKind::Unknown(raw) => write!(f, "UNKNOWN({raw})"),
        }
    }
}

/// A typed request: the job kind plus opaque arguments for the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub kind: JobKind,
    pub args: Vec<String>,
}

impl JobRequest {
    pub fn new(kind: JobKind, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Concrete command line ready to launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub executable: PathBuf,
    pub args: Vec<String>,
}

impl ResolvedCommand {
    /// Human-readable command line for logs. Not shell-escaped.
    pub fn display_line(&self) -> String {
        let mut line = self.executable.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Uniform outcome of a job. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl JobResult {
    /// The job ran to completion; its output and exit code pass through.
    pub fn completed(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_line_joins_executable_and_args() {
        let cmd = ResolvedCommand {
            executable: PathBuf::from("/opt/bin/import"),
            args: vec!["--source".into(), "region.osm".into()],
        };
        assert_eq!(cmd.display_line(), "/opt/bin/import --source region.osm");
    }

    #[test]
    fn job_kind_display() {
        assert_eq!(JobKind::Import.to_string(), "IMPORT");
        assert_eq!(JobKind::Unknown(9).to_string(), "UNKNOWN(9)");
    }
}
