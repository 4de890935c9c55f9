//! `appdock` with no subcommand: the interactive main menu.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::Prompter;
use crate::application::services::SessionEnd;
use crate::commands::{apps, settings};

const MENU: [&str; 3] = ["1.) Apps", "2.) Settings", "Exit"];

/// Loop over the main menu until the operator exits.
///
/// # Errors
///
/// Returns an error if a listing cannot be fetched or a prompt fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let labels: Vec<String> = MENU.iter().map(ToString::to_string).collect();
    loop {
        let prompter = app.prompter();
        prompter.clear();
        app.output.banner(env!("CARGO_PKG_VERSION"));
        let end = match prompter.select("What would you like to do?", &labels, 0)? {
            0 => apps::menu(app).await?,
            1 => settings::run(app).await?,
            _ => SessionEnd::Exit,
        };
        if end == SessionEnd::Exit {
            prompter.clear();
            return Ok(());
        }
    }
}
