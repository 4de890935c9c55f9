//! `appdock setup`: first-run wizard and the backend's install plan.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::question_flow::QuestionFlow;
use crate::application::services::setup_wizard::{self as service, SetupOutcome};

/// Run `appdock setup`.
///
/// Returns `false` when no install plan was run.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub async fn run(app: &AppContext) -> Result<bool> {
    let prompter = app.prompter();
    let validator = app.validator();
    let defaults = app.defaults();
    let reporter = app.terminal_reporter();
    let flow = QuestionFlow::new(&prompter, &validator, &defaults).with_reporter(&reporter);

    app.output.banner(env!("CARGO_PKG_VERSION"));
    let outcome = service::run_setup(&flow, &app.settings, &app.backend, &reporter).await?;

    match outcome {
        SetupOutcome::Installed { summary, .. } => {
            if summary.failed() == 0 {
                app.output.success("Setup complete.");
            } else {
                app.output.warn(&format!(
                    "Setup finished with {} failed app(s). Install them later with `appdock apps install`.",
                    summary.failed()
                ));
            }
            Ok(true)
        }
        SetupOutcome::PlanDeclined { .. } => {
            app.output
                .warn("Install plan declined. Your answers were saved; run `appdock setup` to start over.");
            Ok(false)
        }
        SetupOutcome::PlanUnavailable { reason, .. } => {
            tracing::warn!(%reason, "setup stopped without an install plan");
            app.output.warn(
                "Could not fetch the install plan. Your answers were saved; run `appdock setup` to try again.",
            );
            Ok(false)
        }
    }
}
