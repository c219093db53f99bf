use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

pub const DEFAULT_INPUT: &str = "resume.json";
pub const DEFAULT_OUTPUT: &str = "resume.generated.json";
pub const DEFAULT_EXPORT: &str = "resume.pdf";

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cvtrim",
    version,
    about = "Pick the parts of a JSON resume to keep and optionally render the result"
)]
pub struct Cli {
    /// Source resume, resolved against the current directory.
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Where to write the generated resume. Prompted for when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop after writing the generated resume.
    #[arg(long)]
    pub skip_export: bool,

    /// Theme to export with. Skips the theme prompt.
    #[arg(long)]
    pub theme: Option<String>,
}

/// Runtime configuration loaded from environment variables (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Package name prefix that marks an installed rendering theme.
    pub theme_prefix: String,
    /// Package manager used to list installed themes.
    pub npm_bin: String,
    /// Renderer invoked for export.
    pub exporter_bin: String,
    pub command_timeout: Duration,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme_prefix: "jsonresume-theme-".to_string(),
            npm_bin: "npm".to_string(),
            exporter_bin: "resume".to_string(),
            command_timeout: Duration::from_secs(120),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let timeout_secs = match std::env::var("CVTRIM_COMMAND_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("CVTRIM_COMMAND_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => defaults.command_timeout.as_secs(),
        };

        Ok(Config {
            theme_prefix: env_or("CVTRIM_THEME_PREFIX", defaults.theme_prefix),
            npm_bin: env_or("CVTRIM_NPM_BIN", defaults.npm_bin),
            exporter_bin: env_or("CVTRIM_EXPORTER_BIN", defaults.exporter_bin),
            command_timeout: Duration::from_secs(timeout_secs),
            rust_log: env_or("RUST_LOG", defaults.rust_log),
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["cvtrim"]);
        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT));
        assert!(cli.output.is_none());
        assert!(!cli.skip_export);
        assert!(cli.theme.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "cvtrim",
            "cv.json",
            "-o",
            "short.json",
            "--skip-export",
            "--theme",
            "jsonresume-theme-even",
        ]);
        assert_eq!(cli.input, PathBuf::from("cv.json"));
        assert_eq!(cli.output, Some(PathBuf::from("short.json")));
        assert!(cli.skip_export);
        assert_eq!(cli.theme.as_deref(), Some("jsonresume-theme-even"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.theme_prefix, "jsonresume-theme-");
        assert_eq!(config.command_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_env_or_falls_back_when_unset() {
        assert_eq!(
            env_or("CVTRIM_TEST_SURELY_UNSET_VARIABLE", "fallback".to_string()),
            "fallback"
        );
    }
}
