use std::collections::BTreeMap;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::CollaboratorError;
use crate::export::{ExportReport, ExportRequest, ThemeExporter};

/// Lists themes through `npm ls --json --depth=0` and exports through the JSON Resume CLI
/// (`resume export <output> --resume <document> --theme <theme>`).
#[derive(Debug, Clone)]
pub struct NpmThemeExporter {
    npm_bin: String,
    exporter_bin: String,
    theme_prefix: String,
    timeout: Duration,
}

/// The part of `npm ls --json` we read.
#[derive(Debug, Default, Deserialize)]
struct NpmListing {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
}

impl NpmThemeExporter {
    pub fn new(config: &Config) -> Self {
        Self {
            npm_bin: config.npm_bin.clone(),
            exporter_bin: config.exporter_bin.clone(),
            theme_prefix: config.theme_prefix.clone(),
            timeout: config.command_timeout,
        }
    }

    fn export_args(request: &ExportRequest) -> Vec<String> {
        vec![
            "export".to_string(),
            request.output.display().to_string(),
            "--resume".to_string(),
            request.document.display().to_string(),
            "--theme".to_string(),
            request.theme.clone(),
        ]
    }

    async fn try_list_themes(&self) -> Result<Vec<String>, CollaboratorError> {
        let args = vec!["ls".to_string(), "--json".to_string(), "--depth=0".to_string()];
        let output = run(&self.npm_bin, &args, self.timeout).await?;

        // npm ls exits non-zero on peer-dependency problems but still prints the tree.
        if !output.status.success() && output.stdout.is_empty() {
            return Err(failed(&self.npm_bin, &args, &output));
        }

        parse_theme_listing(&output.stdout, &self.theme_prefix)
    }
}

#[async_trait]
impl ThemeExporter for NpmThemeExporter {
    async fn list_themes(&self) -> Vec<String> {
        match self.try_list_themes().await {
            Ok(themes) => {
                debug!("Discovered {} theme(s)", themes.len());
                themes
            }
            Err(e) => {
                warn!("Theme discovery unavailable: {e}");
                Vec::new()
            }
        }
    }

    async fn export(&self, request: &ExportRequest) -> Result<ExportReport, CollaboratorError> {
        let args = Self::export_args(request);
        info!(
            "Exporting {} with theme '{}'",
            request.document.display(),
            request.theme
        );

        let output = run(&self.exporter_bin, &args, self.timeout).await?;
        if !output.status.success() {
            return Err(failed(&self.exporter_bin, &args, &output));
        }

        Ok(ExportReport {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn manual_command(&self, request: &ExportRequest) -> String {
        command_line(&self.exporter_bin, &Self::export_args(request))
    }
}

/// Extracts dependency names carrying `prefix` from `npm ls --json` output, sorted.
pub fn parse_theme_listing(stdout: &[u8], prefix: &str) -> Result<Vec<String>, CollaboratorError> {
    let listing: NpmListing = serde_json::from_slice(stdout)?;
    Ok(listing
        .dependencies
        .into_keys()
        .filter(|name| name.starts_with(prefix))
        .collect())
}

/// Runs `program` once, capturing output, bounded by `timeout`.
async fn run(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<std::process::Output, CollaboratorError> {
    let shown = command_line(program, args);
    debug!("Running `{shown}`");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| CollaboratorError::Spawn {
            command: shown.clone(),
            source,
        })?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| CollaboratorError::Spawn {
            command: shown,
            source,
        }),
        Err(_) => Err(CollaboratorError::Timeout {
            command: shown,
            secs: timeout.as_secs(),
        }),
    }
}

fn failed(
    program: &str,
    args: &[String],
    output: &std::process::Output,
) -> CollaboratorError {
    CollaboratorError::Failed {
        command: command_line(program, args),
        status: output.status.to_string(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.contains(char::is_whitespace) {
                format!("\"{part}\"")
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
