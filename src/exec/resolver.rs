// src/exec/resolver.rs

//! Maps a [`JobRequest`] to the concrete command line to launch.

use std::path::PathBuf;

use crate::config::JobsConfig;
use crate::exec::failure::UnknownCommand;
use crate::types::{JobKind, JobRequest, ResolvedCommand};

/// Knows where the import and reindex binaries live.
///
/// Pure: resolving never touches the filesystem. A missing binary surfaces
/// later as a launch failure.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    import_bin: PathBuf,
    reindex_bin: PathBuf,
}

impl CommandResolver {
    pub fn new(import_bin: impl Into<PathBuf>, reindex_bin: impl Into<PathBuf>) -> Self {
        Self {
            import_bin: import_bin.into(),
            reindex_bin: reindex_bin.into(),
        }
    }

    pub fn from_config(jobs: &JobsConfig) -> Self {
        Self::new(jobs.import_bin.clone(), jobs.reindex_bin.clone())
    }

    /// Build the command for `request`. Arguments are appended verbatim and in
    /// order.
    pub fn resolve(&self, request: &JobRequest) -> Result<ResolvedCommand, UnknownCommand> {
        let executable = match request.kind {
            JobKind::Import => &self.import_bin,
            JobKind::Reindex => &self.reindex_bin,
            kind @ JobKind::Unknown(_) => return Err(UnknownCommand { kind }),
        };

        Ok(ResolvedCommand {
            executable: executable.clone(),
            args: request.args.clone(),
        })
    }
}
