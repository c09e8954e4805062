// src/wire/messages.rs

//! Protobuf messages exchanged with callers.
//!
//! Declared with `prost` derives directly (there is no `.proto` build step):
//!
//! ```text
//! message ImportRequest {
//!   enum Command { IMPORT = 0; REINDEX = 1; }
//!   Command command = 1;
//!   repeated string args = 2;
//! }
//! message ImportResponse {
//!   string stdout = 1;
//!   string stderr = 2;
//!   int32 exit_code = 3;
//! }
//! ```

use crate::types::{JobKind, JobRequest, JobResult};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ImportRequest {
    #[prost(enumeration = "Command", tag = "1")]
    pub command: i32,
    #[prost(string, repeated, tag = "2")]
    pub args: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ImportResponse {
    #[prost(string, tag = "1")]
    pub stdout: String,
    #[prost(string, tag = "2")]
    pub stderr: String,
    #[prost(int32, tag = "3")]
    pub exit_code: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Command {
    Import = 0,
    Reindex = 1,
}

impl ImportRequest {
    pub fn new(command: Command, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ImportRequest> for JobRequest {
    fn from(req: ImportRequest) -> Self {
        let kind = match Command::try_from(req.command) {
            Ok(Command::Import) => JobKind::Import,
            Ok(Command::Reindex) => JobKind::Reindex,
            Err(_) => JobKind::Unknown(req.command),
        };
        JobRequest {
            kind,
            args: req.args,
        }
    }
}

impl From<JobResult> for ImportResponse {
    fn from(result: JobResult) -> Self {
        Self {
            stdout: result.stdout,
            stderr: result.stderr,
            exit_code: result.exit_code,
        }
    }
}
