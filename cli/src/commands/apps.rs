//! `appdock apps`: install, delete and inspect apps.

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::{Prompter, SettingsStore};
use crate::application::services::SessionEnd;
use crate::application::services::app_sessions;
use crate::application::services::question_flow::QuestionFlow;
use crate::domain::settings::to_answers;

/// Apps subcommands.
#[derive(Subcommand)]
pub enum AppsCommand {
    /// Pick catalog apps and install them
    Install,
    /// Pick installed apps and delete them
    Delete,
    /// Show containers and start, stop, restart or kill one
    Status,
}

const MENU: [&str; 5] = [
    "1.) Install Apps",
    "2.) Delete Apps",
    "3.) App Status",
    "Back",
    "Exit",
];

/// Run an apps subcommand.
///
/// # Errors
///
/// Returns an error if a listing cannot be fetched or a prompt fails.
pub async fn run(app: &AppContext, cmd: AppsCommand) -> Result<SessionEnd> {
    match cmd {
        AppsCommand::Install => install(app).await,
        AppsCommand::Delete => delete(app).await,
        AppsCommand::Status => app_sessions::status_session(&app.prompter(), &app.backend).await,
    }
}

/// The apps sub-menu shown from the main menu.
///
/// # Errors
///
/// Returns an error if a listing cannot be fetched or a prompt fails.
pub async fn menu(app: &AppContext) -> Result<SessionEnd> {
    let labels: Vec<String> = MENU.iter().map(ToString::to_string).collect();
    loop {
        let prompter = app.prompter();
        prompter.clear();
        app.output.banner(env!("CARGO_PKG_VERSION"));
        let cmd = match prompter.select("What would you like to do?", &labels, 0)? {
            0 => AppsCommand::Install,
            1 => AppsCommand::Delete,
            2 => AppsCommand::Status,
            3 => return Ok(SessionEnd::Back),
            _ => return Ok(SessionEnd::Exit),
        };
        if run(app, cmd).await? == SessionEnd::Exit {
            return Ok(SessionEnd::Exit);
        }
    }
}

async fn install(app: &AppContext) -> Result<SessionEnd> {
    let stored = app
        .settings
        .find_all()
        .await
        .context("reading stored settings")?;
    let answers = to_answers(&stored);

    let prompter = app.prompter();
    let validator = app.validator();
    let defaults = app.defaults();
    let reporter = app.terminal_reporter();
    let flow = QuestionFlow::new(&prompter, &validator, &defaults).with_reporter(&reporter);
    app_sessions::install_session(&flow, &app.catalog, &app.backend, &answers).await
}

async fn delete(app: &AppContext) -> Result<SessionEnd> {
    let prompter = app.prompter();
    let validator = app.validator();
    let defaults = app.defaults();
    let reporter = app.terminal_reporter();
    let flow = QuestionFlow::new(&prompter, &validator, &defaults).with_reporter(&reporter);
    app_sessions::delete_session(&flow, &app.backend).await
}
