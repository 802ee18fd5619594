// src/errors.rs

//! Crate-wide error type and exit-code mapping.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code used when the run is aborted by Ctrl-C.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Exit code used for every other failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing required executables: {}. Install them and retry.", .0.join(", "))]
    MissingTools(Vec<String>),

    #[error("Missing environment variables: {}.", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("Command '{command}' returned non-zero exit status {code}.")]
    CommandFailed { command: String, code: i32 },

    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The revision hash could not be determined and no tag was given.
    #[error("Unable to determine git SHA; set IMAGE_TAG manually.")]
    RevisionLookup { reason: String },

    #[error("interrupted")]
    Interrupted,

    #[error("failed to read env file {path:?}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PipelineError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Interrupted => EXIT_INTERRUPTED,
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
