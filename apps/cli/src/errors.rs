use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

/// Application-level error type.
///
/// Every variant is fatal: `main` reports it once and exits non-zero. A user declining a
/// prompt is not an error and never reaches this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not read resume at {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resume at {} is not valid JSON: {source}", .path.display())]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No recognizable sections found in {}", .path.display())]
    NoSections { path: PathBuf },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Could not write generated resume to {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-readable code, logged alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ReadInput { .. } => "READ_INPUT",
            AppError::ParseInput { .. } => "PARSE_INPUT",
            AppError::NoSections { .. } => "NO_SECTIONS",
            AppError::Prompt(_) => "PROMPT",
            AppError::WriteOutput { .. } => "WRITE_OUTPUT",
            AppError::Internal(_) => "INTERNAL",
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::FAILURE
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Prompt(err.to_string())
    }
}

/// Failure of an external collaborator (theme listing, exporter). Never fatal: callers log
/// it and degrade.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` did not finish within {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("`{command}` exited with {status}")]
    Failed {
        command: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    #[error("Unreadable theme listing: {0}")]
    InvalidListing(#[from] serde_json::Error),
}
