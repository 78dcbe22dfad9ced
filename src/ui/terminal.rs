use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm as ConfirmDialog};
use crate::error::Result;
use super::actions::{Confirm, ConfirmPrompt, Notifier, PromptVariant};

/// Asks on the terminal.
pub struct TerminalConfirm {
    theme: ColorfulTheme,
}

impl Default for TerminalConfirm {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool> {
        let title = match prompt.variant {
            PromptVariant::Danger => style(prompt.title).red().bold(),
            PromptVariant::Confirmation => style(prompt.title).bold(),
        };
        eprintln!("{}", title);

        let confirmed = ConfirmDialog::with_theme(&self.theme)
            .with_prompt(prompt.description)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}

/// Answers yes without asking (`--yes`).
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &ConfirmPrompt) -> Result<bool> {
        Ok(true)
    }
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{} {} {}", style("✓").green(), style("Success").bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {} {}", style("✗").red(), style("Error").bold(), message);
    }
}
