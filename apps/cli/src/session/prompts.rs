use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};

use crate::errors::AppError;

/// One row of a multi-select prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptChoice {
    pub title: String,
    pub selected: bool,
}

impl PromptChoice {
    pub fn new(title: impl Into<String>, selected: bool) -> Self {
        Self {
            title: title.into(),
            selected,
        }
    }
}

/// The interactive collaborator that answers the session's questions.
///
/// `Ok(None)` means the user cancelled the prompt. `Ok(Some(vec![]))` from a multi-select
/// means the user confirmed an empty selection. Both are valid answers, not errors.
pub trait Prompter {
    /// Returns the indices of the chosen rows, ascending.
    fn multi_select(
        &mut self,
        message: &str,
        choices: &[PromptChoice],
    ) -> Result<Option<Vec<usize>>, AppError>;

    fn select(&mut self, message: &str, items: &[String]) -> Result<Option<usize>, AppError>;

    fn text(&mut self, message: &str, initial: &str) -> Result<Option<String>, AppError>;
}

/// Terminal prompts backed by dialoguer. Esc / q cancels a selection prompt.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn multi_select(
        &mut self,
        message: &str,
        choices: &[PromptChoice],
    ) -> Result<Option<Vec<usize>>, AppError> {
        let titles: Vec<&str> = choices.iter().map(|c| c.title.as_str()).collect();
        let defaults: Vec<bool> = choices.iter().map(|c| c.selected).collect();

        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(&titles)
            .defaults(&defaults)
            .interact_opt()?;

        Ok(picked.map(|mut indices| {
            indices.sort_unstable();
            indices
        }))
    }

    fn select(&mut self, message: &str, items: &[String]) -> Result<Option<usize>, AppError> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()?)
    }

    fn text(&mut self, message: &str, initial: &str) -> Result<Option<String>, AppError> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(message)
            .default(initial.to_string())
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(answer))
    }
}
