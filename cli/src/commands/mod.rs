//! Command implementations

pub mod apps;
pub mod menu;
pub mod settings;
pub mod setup;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::ports::SettingsStore;

/// Run the setup wizard first when nothing has been stored yet.
///
/// Returns `false` when the caller should stop (no install plan was run).
///
/// # Errors
///
/// Returns an error if the settings store cannot be read at all, or if the
/// wizard itself fails.
pub async fn ensure_setup(app: &AppContext) -> Result<bool> {
    let stored = app
        .settings
        .find_all()
        .await
        .context("There was an error reading the settings store")?;
    if !stored.is_empty() {
        return Ok(true);
    }
    tracing::info!("no stored settings; running setup");
    setup::run(app).await
}
