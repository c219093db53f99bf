// Interactive session: one orchestrator owns the SelectionState and walks the fixed prompt
// sequence (contacts, sections, per-section items, output path, theme, export path).

pub mod orchestrator;
pub mod prompts;

pub use orchestrator::{run, RunOutcome};
pub use prompts::TerminalPrompter;
