mod config;
mod errors;
mod export;
mod models;
mod selection;
mod session;
mod storage;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Cli, Config};
use crate::export::NpmThemeExporter;
use crate::session::{RunOutcome, TerminalPrompter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so stdout carries only prompts and exporter output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting cvtrim v{}", env!("CARGO_PKG_VERSION"));

    let mut prompter = TerminalPrompter::new();
    let exporter = NpmThemeExporter::new(&config);

    match session::run(&cli, &mut prompter, &exporter).await {
        Ok(RunOutcome::Completed { output, exported }) => {
            info!(
                "Done: {} (exported: {})",
                output.display(),
                exported
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "no".to_string())
            );
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Aborted(_)) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code(), "{e}");
            eprintln!("Error while generating resume: {e}");
            e.exit_code()
        }
    }
}
