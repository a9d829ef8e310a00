//! Fatal launcher errors. None of them are retried: each one short-circuits
//! the bootstrap and is handed to a [`FailureReporter`](crate::report::FailureReporter).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Cannot determine the launcher executable path: {source}")]
    PathResolution {
        #[source]
        source: io::Error,
    },

    #[error("Cannot use working directory:\n{}\n{source}", .path.display())]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse command-line arguments: {0}")]
    ArgumentParse(String),

    #[error("Python interpreter not found:\n{}", .path.display())]
    InterpreterNotFound { path: PathBuf },

    #[error("Failed to start child process:\n{command_line}\n{source}")]
    ProcessSpawn {
        command_line: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to retrieve child exit code: {source}")]
    ExitCodeRetrieval {
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Name of the bootstrap step that failed, for logs.
    pub fn step(&self) -> &'static str {
        match self {
            Self::PathResolution { .. } => "path_resolution",
            Self::WorkingDirectory { .. } => "working_directory",
            Self::ArgumentParse(_) => "argument_parse",
            Self::InterpreterNotFound { .. } => "interpreter_check",
            Self::ProcessSpawn { .. } => "process_spawn",
            Self::ExitCodeRetrieval { .. } => "exit_code_retrieval",
        }
    }
}
