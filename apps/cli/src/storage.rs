use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::resume::{FilteredDocument, ResumeDocument};

/// Resolves `path` against the current working directory.
pub fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Reads and parses the source resume. Missing or malformed input is fatal.
pub async fn load_resume(path: &Path) -> Result<ResumeDocument, AppError> {
    let path = resolve(path);
    debug!("Loading resume from {}", path.display());

    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| AppError::ReadInput {
            path: path.clone(),
            source,
        })?;

    serde_json::from_str(&raw).map_err(|source| AppError::ParseInput { path, source })
}

/// Writes the filtered resume with 2-space indentation and returns the absolute path.
pub async fn write_filtered(path: &Path, doc: &FilteredDocument) -> Result<PathBuf, AppError> {
    let path = resolve(path);
    let body = serde_json::to_string_pretty(doc).map_err(anyhow::Error::from)?;

    tokio::fs::write(&path, body)
        .await
        .map_err(|source| AppError::WriteOutput {
            path: path.clone(),
            source,
        })?;

    info!("Generated resume written to {}", path.display());
    Ok(path)
}
