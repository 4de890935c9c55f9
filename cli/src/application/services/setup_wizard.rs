//! Application service: first-run setup.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Steps: wizard questions with summary confirmation, best-effort settings
//! persistence, SSO and proxy credentials, then the backend's install plan.

use anyhow::Result;

use crate::application::ports::{AppBackend, ProgressReporter, Prompter, SettingsStore};
use crate::application::services::orchestrator::{PlannedInstall, report, run_batch};
use crate::application::services::question_flow::{AnswerValidator, DefaultResolver, QuestionFlow};
use crate::domain::settings::persistable;
use crate::domain::setup::{
    SSO_SECRET_TITLES, proxy_questions, setup_request, sso_questions, wizard_questions,
    wizard_summary,
};
use crate::domain::{AnswerRecord, BatchKind, BatchSummary, CatalogItem};

pub const PLAN_CONFIRMATION: &str =
    "Please confirm if you would like to install the apps listed above?";
pub const PLAN_RETRY: &str = "Would you like to request the install plan again?";

/// Outcome of the `run_setup` use-case.
#[derive(Debug)]
pub enum SetupOutcome {
    /// The plan was installed (fully or partially).
    Installed {
        answers: AnswerRecord,
        summary: BatchSummary,
    },
    /// Settings were saved but the operator declined the install plan.
    PlanDeclined { answers: AnswerRecord },
    /// Settings were saved but the backend never produced a plan and the
    /// operator stopped retrying.
    PlanUnavailable { answers: AnswerRecord, reason: String },
}

/// Write one setting per answer. Failures are logged and skipped.
///
/// Returns the number of settings that could not be written.
pub async fn persist_answers(
    store: &impl SettingsStore,
    answers: &AnswerRecord,
    reporter: &impl ProgressReporter,
) -> usize {
    reporter.step("saving settings...");
    let mut failed = 0;
    for record in persistable(answers) {
        if let Err(e) = store.upsert(&record).await {
            tracing::warn!(setting = %record.name, error = %e, "could not save setting");
            failed += 1;
        }
    }
    if failed == 0 {
        reporter.success("settings saved");
    } else {
        reporter.warn(&format!("{failed} setting(s) could not be saved"));
    }
    failed
}

/// Run the whole first-run setup.
///
/// # Errors
///
/// Returns an error if a prompt fails. A plan request that fails is offered
/// again; once declined the outcome is [`SetupOutcome::PlanUnavailable`].
pub async fn run_setup<P, V, D, R>(
    flow: &QuestionFlow<'_, P, V, D, R>,
    store: &impl SettingsStore,
    backend: &impl AppBackend,
    reporter: &impl ProgressReporter,
) -> Result<SetupOutcome>
where
    P: Prompter,
    V: AnswerValidator,
    D: DefaultResolver,
    R: ProgressReporter,
{
    let prompter = flow.prompter();
    let answers = flow.run(&wizard_questions(), wizard_summary).await?;
    persist_answers(store, &answers, reporter).await;

    let mut full = answers.clone();
    if answers.flag("sso") {
        prompter.clear();
        prompter.notice("SSO Setup");
        prompter.notice("");
        full = flow.collect(&sso_questions(), &full).await?;
    }
    full = flow.collect(&proxy_questions(), &full).await?;

    let request = setup_request(&answers);
    let plan = loop {
        reporter.step("computing install plan...");
        match backend.setup_plan(&request).await {
            Ok(plan) => {
                reporter.success(&format!("{} app(s) planned", plan.results.len()));
                break plan;
            }
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::warn!(error = %reason, "install plan request failed");
                reporter.warn("could not compute the install plan");
                prompter.notice(&format!("The install plan could not be fetched ({reason})"));
                if !prompter.confirm(PLAN_RETRY, true)? {
                    return Ok(SetupOutcome::PlanUnavailable { answers, reason });
                }
            }
        }
    };

    prompter.clear();
    prompter.notice("Based on your input, the following apps will be installed.");
    prompter.notice("");
    for app in &plan.results {
        prompter.notice(app);
    }
    prompter.notice("");
    prompter.notice(&format!("Total: {}", plan.results.len()));
    prompter.notice("");
    if !prompter.confirm(PLAN_CONFIRMATION, true)? {
        return Ok(SetupOutcome::PlanDeclined { answers });
    }

    let items = plan
        .results
        .iter()
        .map(|app| CatalogItem::new(app.clone(), app.clone()))
        .collect();
    let records = run_batch(flow, &PlannedInstall::new(backend), items, &full).await?;
    let summary = report(prompter, BatchKind::Install, &records);

    if full.flag("sso") {
        prompter.notice("Please make a note of the following passwords.");
        prompter.notice("");
        let rows: Vec<(String, String)> = SSO_SECRET_TITLES
            .iter()
            .filter_map(|(key, title)| full.text(key).map(|v| ((*title).to_string(), v.to_string())))
            .collect();
        prompter.table(&rows);
    }
    prompter.input("When you are finished, press Enter to continue", Some(""))?;

    Ok(SetupOutcome::Installed { answers, summary })
}
