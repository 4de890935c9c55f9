//! Application service: the install, delete and status screens.
//!
//! Install and delete alternate between selection and a batch run until the
//! operator stops asking for more.

use anyhow::Result;
use appdock_common::ContainerAction;

use crate::application::ports::{AppBackend, CatalogSource, ProgressReporter, Prompter};
use crate::application::services::SessionEnd;
use crate::application::services::catalog_selection::{
    CatalogPages, DELETE_PROMPT, INSTALL_PROMPT, InstalledPages, PageSource, RETRY_PROMPT,
    SelectionOutcome, choose,
};
use crate::application::services::orchestrator::{
    BatchAction, CatalogInstall, Removal, report, run_batch,
};
use crate::application::services::question_flow::{AnswerValidator, DefaultResolver, QuestionFlow};
use crate::domain::AnswerRecord;
use crate::domain::containers::{sort_running_first, status_lines};

pub const CONTINUE_PROMPT: &str = "Press Enter to continue";

/// Select catalog apps and install them, repeatedly.
///
/// `answers` are the stored settings forwarded with each install.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub async fn install_session<P, V, D, C, B, R>(
    flow: &QuestionFlow<'_, P, V, D, R>,
    catalog: &C,
    backend: &B,
    answers: &AnswerRecord,
) -> Result<SessionEnd>
where
    P: Prompter,
    V: AnswerValidator,
    D: DefaultResolver,
    R: ProgressReporter,
    C: CatalogSource,
    B: AppBackend,
{
    let pages = CatalogPages::new(catalog, backend);
    let action = CatalogInstall::new(catalog, backend);
    batch_session(flow, &pages, INSTALL_PROMPT, &action, answers).await
}

/// Select installed apps and delete them, repeatedly.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub async fn delete_session<P, V, D, B, R>(
    flow: &QuestionFlow<'_, P, V, D, R>,
    backend: &B,
) -> Result<SessionEnd>
where
    P: Prompter,
    V: AnswerValidator,
    D: DefaultResolver,
    R: ProgressReporter,
    B: AppBackend,
{
    let pages = InstalledPages::new(backend);
    let action = Removal::new(backend);
    batch_session(flow, &pages, DELETE_PROMPT, &action, &AnswerRecord::new()).await
}

async fn batch_session<P, V, D, S, A, R>(
    flow: &QuestionFlow<'_, P, V, D, R>,
    pages: &S,
    prompt: &str,
    action: &A,
    answers: &AnswerRecord,
) -> Result<SessionEnd>
where
    P: Prompter,
    V: AnswerValidator,
    D: DefaultResolver,
    R: ProgressReporter,
    S: PageSource,
    A: BatchAction,
{
    let prompter = flow.prompter();
    loop {
        let selection = match choose(prompter, pages, prompt).await? {
            SelectionOutcome::Submit(selection) => selection,
            SelectionOutcome::Back => return Ok(SessionEnd::Back),
            SelectionOutcome::Exit => return Ok(SessionEnd::Exit),
        };
        let records = run_batch(flow, action, selection.into_items(), answers).await?;
        let summary = report(prompter, action.kind(), &records);
        tracing::info!(
            total = summary.total,
            succeeded = summary.succeeded,
            "batch finished"
        );
        if !prompter.confirm(action.kind().repeat_prompt(), true)? {
            return Ok(SessionEnd::Back);
        }
    }
}

/// Container table with start/stop/restart/kill on a single container.
///
/// A listing failure is shown with a retry offer; declining goes back.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub async fn status_session(prompter: &impl Prompter, backend: &impl AppBackend) -> Result<SessionEnd> {
    let mut labels: Vec<String> = ContainerAction::ALL
        .iter()
        .map(|a| a.label().to_string())
        .collect();
    labels.push("Back".to_string());
    labels.push("Exit".to_string());

    loop {
        let mut containers = match backend.list_installed().await {
            Ok(listing) => listing.results,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "could not list installed apps");
                prompter.notice(&format!("Could not load the installed apps ({e:#})"));
                if prompter.confirm(RETRY_PROMPT, true)? {
                    continue;
                }
                return Ok(SessionEnd::Back);
            }
        };
        sort_running_first(&mut containers);

        prompter.clear();
        for line in status_lines(&containers) {
            prompter.notice(&line);
        }
        prompter.notice("");

        let index = prompter.select("Select an action?", &labels, 0)?;
        let Some(action) = ContainerAction::ALL.get(index).copied() else {
            return Ok(if index == labels.len() - 1 {
                SessionEnd::Exit
            } else {
                SessionEnd::Back
            });
        };

        if containers.is_empty() {
            prompter.notice("No apps installed.");
            pause(prompter)?;
            continue;
        }
        let mut names: Vec<String> = containers.iter().map(|c| c.name().to_string()).collect();
        names.push("Cancel".to_string());
        let picked = prompter.select(&format!("{} which app?", action.label()), &names, 0)?;
        let Some(container) = containers.get(picked) else {
            continue;
        };

        tracing::info!(id = %container.id, ?action, "container action");
        if let Err(e) = backend.container_action(&container.id, action).await {
            tracing::warn!(id = %container.id, error = %e, "container action failed");
            prompter.notice(&format!(
                "Could not {} {}: {e}",
                action.label().to_lowercase(),
                container.name()
            ));
            pause(prompter)?;
        }
    }
}

/// Hold a notice on screen until the operator acknowledges it.
fn pause(prompter: &impl Prompter) -> Result<()> {
    prompter.input(CONTINUE_PROMPT, Some(""))?;
    Ok(())
}
