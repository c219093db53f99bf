//! Theme/Export collaborator: the boundary to the external rendering toolchain.
//!
//! Nothing in here is fatal. Theme discovery degrades to an empty list and a failed export
//! is reported together with the command the user can run by hand.

pub mod npm;

use std::path::PathBuf;

use async_trait::async_trait;
use crate::errors::CollaboratorError;

pub use npm::NpmThemeExporter;

/// What to render, with which theme, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub document: PathBuf,
    pub theme: String,
    pub output: PathBuf,
}

/// Output of a finished exporter run, surfaced to the user verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub stdout: String,
    pub stderr: String,
}

/// Carried by the session as `&dyn ThemeExporter`; tests swap in a recording fake.
#[async_trait]
pub trait ThemeExporter: Send + Sync {
    /// Installed theme identifiers, sorted. Empty when discovery fails.
    async fn list_themes(&self) -> Vec<String>;

    /// Runs the exporter once. No retries.
    async fn export(&self, request: &ExportRequest) -> Result<ExportReport, CollaboratorError>;

    /// The equivalent shell command, shown when an export fails.
    fn manual_command(&self, request: &ExportRequest) -> String;
}
