//! `TerminalPrompter`: dialoguer-backed implementation of `Prompter`.

use anyhow::{Context, Result};
use console::Term;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize as _;

use crate::application::ports::Prompter;
use crate::output::OutputContext;

/// Interactive prompts on the controlling terminal.
///
/// Screen output from `notice` and `table` is part of the interaction, so it
/// ignores `--quiet`.
pub struct TerminalPrompter<'a> {
    ctx: &'a OutputContext,
    term: Term,
}

impl<'a> TerminalPrompter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            term: Term::stdout(),
        }
    }
}

impl Prompter for TerminalPrompter<'_> {
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default.min(items.len().saturating_sub(1)))
            .max_length(20)
            .interact_on(&self.term)
            .context("selection")
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default.filter(|d| !d.is_empty()) {
            input = input.default(default.to_string());
        }
        input.interact_text_on(&self.term).context("text input")
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact_on(&self.term)
            .context("confirmation")
    }

    fn notice(&self, message: &str) {
        println!("{message}");
    }

    fn table(&self, rows: &[(String, String)]) {
        let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        for (key, value) in rows {
            println!(
                "  {}  {value}",
                format!("{key:<width$}").style(self.ctx.styles.bold)
            );
        }
        println!();
    }

    fn clear(&self) {
        if self.ctx.is_tty && self.term.clear_screen().is_err() {
            tracing::debug!("could not clear the terminal");
        }
    }
}
