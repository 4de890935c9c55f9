//! `appdock settings`: edit stored settings.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::SessionEnd;
use crate::application::services::question_flow::QuestionFlow;
use crate::application::services::settings_editor;

/// Run `appdock settings`.
///
/// # Errors
///
/// Returns an error if the settings cannot be listed or a prompt fails.
pub async fn run(app: &AppContext) -> Result<SessionEnd> {
    let prompter = app.prompter();
    let validator = app.validator();
    let defaults = app.defaults();
    let reporter = app.terminal_reporter();
    let flow = QuestionFlow::new(&prompter, &validator, &defaults).with_reporter(&reporter);

    settings_editor::edit_settings(&flow, &app.settings).await
}
