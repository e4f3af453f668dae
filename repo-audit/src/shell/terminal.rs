//! Dialoguer/console/indicatif-backed shell.

use super::{Shell, ShellError, TaskHandle};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Interactive shell rendering to the real terminal.
pub struct TerminalShell {
    theme: ColorfulTheme,
    tasks: MultiProgress,
}

impl TerminalShell {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            tasks: MultiProgress::new(),
        }
    }
}

impl Default for TerminalShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell for TerminalShell {
    fn frame(&self, title: &str) {
        println!();
        println!("{} {}", style("──").cyan(), style(title).cyan().bold());
    }

    fn note(&self, message: &str) {
        println!("{} {message}", style("i").cyan());
    }

    fn success(&self, message: &str) {
        println!("{} {message}", style("✓").green());
    }

    fn failure(&self, message: &str) {
        println!("{} {message}", style("✗").red());
    }

    fn confirm(&self, prompt: &str) -> Result<bool, ShellError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact()?)
    }

    fn select(&self, prompt: &str, labels: &[&str]) -> Result<usize, ShellError> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(labels)
            .default(0)
            .interact()?)
    }

    fn input(&self, prompt: &str) -> Result<String, ShellError> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?)
    }

    fn task(&self, label: &str) -> Box<dyn TaskHandle + Send> {
        let bar = self.tasks.add(ProgressBar::new_spinner());
        bar.set_style(ProgressStyle::default_spinner());
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Box::new(SpinnerTask {
            bar,
            label: label.to_string(),
        })
    }
}

struct SpinnerTask {
    bar: ProgressBar,
    label: String,
}

impl TaskHandle for SpinnerTask {
    fn complete(self: Box<Self>) {
        self.bar
            .finish_with_message(format!("{} {}", style("✓").green(), self.label));
    }

    fn fail(self: Box<Self>, message: &str) {
        self.bar.finish_with_message(format!(
            "{} {}: {message}",
            style("✗").red(),
            self.label
        ));
    }
}
