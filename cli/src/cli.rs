//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Pick, install and manage self-hosted apps on this server
#[derive(Parser)]
#[command(name = "appdock", version, propagate_version = true)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Interactive main menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the first-run setup wizard
    Setup,

    /// Install, delete or inspect apps
    #[command(subcommand)]
    Apps(commands::apps::AppsCommand),

    /// Edit stored settings
    Settings,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// Every command except `setup` runs the setup wizard first when no
    /// settings have been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store is unreachable, the
    /// configuration is invalid, or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            quiet,
            no_color,
            command,
        } = self;
        let app = AppContext::new(&AppFlags { no_color, quiet })?;

        if let Some(Command::Setup) = command {
            return commands::setup::run(&app).await.map(drop);
        }
        if !commands::ensure_setup(&app).await? {
            return Ok(());
        }
        match command {
            None => commands::menu::run(&app).await,
            Some(Command::Apps(cmd)) => commands::apps::run(&app, cmd).await.map(drop),
            Some(Command::Settings) => commands::settings::run(&app).await.map(drop),
            Some(Command::Setup) => Ok(()),
        }
    }
}
