//! Session orchestrator: drives the prompt sequence and the filter/write/export pipeline.
//!
//! The user declining a top-level prompt ends the run cleanly (`Aborted`), never with an
//! error. Fatal conditions come only from loading, an empty catalog, or I/O.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{Cli, DEFAULT_EXPORT, DEFAULT_OUTPUT};
use crate::errors::{AppError, CollaboratorError};
use crate::export::{ExportRequest, ThemeExporter};
use crate::models::resume::ResumeDocument;
use crate::selection::catalog::build_catalog;
use crate::selection::contacts::{contact_choices, selection_from_fields, ContactField};
use crate::selection::filter::filter_document;
use crate::selection::state::SelectionState;
use crate::session::prompts::{PromptChoice, Prompter};
use crate::storage;

// ────────────────────────────────────────────────────────────────────────────
// Outcomes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    ContactsDeclined,
    NoSectionsSelected,
}

impl AbortReason {
    pub fn message(&self) -> &'static str {
        match self {
            AbortReason::ContactsDeclined => "No contact details selection made. Exiting.",
            AbortReason::NoSectionsSelected => {
                "No sections selected. Exiting without generating a resume."
            }
        }
    }
}

/// Result of the selection phase.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Completed(SelectionState),
    Aborted(AbortReason),
}

/// Result of a whole run. Both variants exit with status 0.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Aborted(AbortReason),
    Completed {
        output: PathBuf,
        exported: Option<PathBuf>,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Selection phase
// ────────────────────────────────────────────────────────────────────────────

/// Walks the contacts, sections and per-section item prompts and returns the filled
/// [`SelectionState`].
///
/// - Contacts prompt cancelled: `Aborted(ContactsDeclined)`. An empty pick is valid.
/// - No recognizable section: fatal `NoSections`, checked once contacts are settled.
/// - Sections prompt cancelled or empty: `Aborted(NoSectionsSelected)`.
/// - Item prompt cancelled or empty: the section stays, with no items.
pub fn collect_selection(
    doc: &ResumeDocument,
    source: &Path,
    prompter: &mut dyn Prompter,
) -> Result<SessionOutcome, AppError> {
    let catalog = build_catalog(doc);
    let mut state = SelectionState::new();

    let contacts = contact_choices(doc.basics.as_ref());
    if !contacts.is_empty() {
        let rows: Vec<PromptChoice> = contacts
            .iter()
            .map(|c| PromptChoice::new(c.title.clone(), c.default_selected))
            .collect();

        let Some(picked) =
            prompter.multi_select("Select which contact details to include", &rows)?
        else {
            return Ok(SessionOutcome::Aborted(AbortReason::ContactsDeclined));
        };

        let fields: Vec<ContactField> = picked
            .iter()
            .filter_map(|&i| contacts.get(i).map(|c| c.field))
            .collect();
        state.basics = selection_from_fields(&fields, doc.basics.as_ref());
        debug!("Contact fields kept: {:?}", fields);
    }

    if catalog.is_empty() {
        return Err(AppError::NoSections {
            path: source.to_path_buf(),
        });
    }
    debug!("Catalog has {} section(s)", catalog.len());

    let rows: Vec<PromptChoice> = catalog
        .iter()
        .map(|s| PromptChoice::new(s.label.clone(), true))
        .collect();
    let picked = prompter
        .multi_select("Select sections to include in the generated resume", &rows)?
        .unwrap_or_default();
    if picked.is_empty() {
        return Ok(SessionOutcome::Aborted(AbortReason::NoSectionsSelected));
    }

    let active = catalog
        .iter()
        .enumerate()
        .filter(|(i, _)| picked.contains(i))
        .map(|(_, section)| section);

    for section in active {
        let rows: Vec<PromptChoice> = section
            .items
            .iter()
            .map(|item| PromptChoice::new(item.label.clone(), true))
            .collect();
        let message = format!("Select items to include from {}", section.label);

        let indices: Vec<usize> = prompter
            .multi_select(&message, &rows)?
            .unwrap_or_default()
            .into_iter()
            .filter_map(|i| section.items.get(i).map(|item| item.index))
            .collect();

        if indices.is_empty() {
            info!("No items kept in {}; the section stays empty", section.label);
        }
        state.select_section(section.key, indices);
    }

    Ok(SessionOutcome::Completed(state))
}

// ────────────────────────────────────────────────────────────────────────────
// Full run
// ────────────────────────────────────────────────────────────────────────────

/// Runs the whole flow: load, select, filter, write, then optionally export.
///
/// Export problems are reported and never turn a run into a failure: the generated resume
/// is already on disk by then.
pub async fn run(
    cli: &Cli,
    prompter: &mut dyn Prompter,
    exporter: &dyn ThemeExporter,
) -> Result<RunOutcome, AppError> {
    let doc = storage::load_resume(&cli.input).await?;

    let state = match collect_selection(&doc, &cli.input, prompter)? {
        SessionOutcome::Completed(state) => state,
        SessionOutcome::Aborted(reason) => {
            info!("Run ended by user: {:?}", reason);
            println!("{}", reason.message());
            return Ok(RunOutcome::Aborted(reason));
        }
    };

    let filtered = filter_document(&doc, &state);

    let output_path = match &cli.output {
        Some(path) => path.clone(),
        None => path_or_default(
            prompter.text("Path for generated resume JSON", DEFAULT_OUTPUT)?,
            DEFAULT_OUTPUT,
        ),
    };
    let output = storage::write_filtered(&output_path, &filtered).await?;
    println!("Generated resume written to: {}", output.display());

    if cli.skip_export {
        return Ok(RunOutcome::Completed {
            output,
            exported: None,
        });
    }

    let exported = export_phase(cli, &output, prompter, exporter).await?;
    Ok(RunOutcome::Completed { output, exported })
}

async fn export_phase(
    cli: &Cli,
    document: &Path,
    prompter: &mut dyn Prompter,
    exporter: &dyn ThemeExporter,
) -> Result<Option<PathBuf>, AppError> {
    let theme = match &cli.theme {
        Some(theme) => theme.clone(),
        None => {
            let themes = exporter.list_themes().await;
            if themes.is_empty() {
                warn!("No rendering themes found; skipping export");
                println!("No installed themes found. Skipping export.");
                return Ok(None);
            }
            match prompter.select("Select a theme to export with", &themes)? {
                Some(i) if i < themes.len() => themes[i].clone(),
                _ => {
                    info!("Theme selection declined; skipping export");
                    return Ok(None);
                }
            }
        }
    };

    let output = path_or_default(
        prompter.text("Path for exported resume", DEFAULT_EXPORT)?,
        DEFAULT_EXPORT,
    );
    let request = ExportRequest {
        document: document.to_path_buf(),
        theme,
        output: storage::resolve(&output),
    };

    match exporter.export(&request).await {
        Ok(report) => {
            print!("{}", report.stdout);
            eprint!("{}", report.stderr);
            println!("Exported resume written to: {}", request.output.display());
            Ok(Some(request.output))
        }
        Err(e) => {
            warn!("Export failed: {e}");
            if let CollaboratorError::Failed { stdout, stderr, .. } = &e {
                print!("{stdout}");
                eprint!("{stderr}");
            }
            eprintln!(
                "Export failed. You can run it manually:\n  {}",
                exporter.manual_command(&request)
            );
            Ok(None)
        }
    }
}

fn path_or_default(answer: Option<String>, default: &str) -> PathBuf {
    answer
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
