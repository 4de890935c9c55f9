//! Application service: sequential batch install/delete.
//!
//! Items are processed strictly one at a time in the given order. A failed
//! item is recorded and the batch moves on; only terminal (prompt) failures
//! abort a run.

use std::collections::BTreeMap;

use anyhow::Result;
use appdock_common::InstallRequest;

use crate::application::ports::{AppBackend, CatalogSource, ProgressReporter, Prompter};
use crate::application::services::question_flow::{AnswerValidator, DefaultResolver, QuestionFlow};
use crate::domain::batch::{BatchLedger, BatchSummary, access_url};
use crate::domain::setup::{INSTALL_CONTEXT_KEYS, setup_app_request};
use crate::domain::{AnswerRecord, BatchKind, CatalogItem, InstallationRecord, ItemStatus, QuestionNode};

/// Failure reason when the remote call itself did not complete.
pub const TRANSPORT_FAILURE: &str = "could not reach the backend";
/// Failure reason when the backend said no without saying why.
pub const REMOTE_FAILURE: &str = "the backend reported a failure";

/// What the backend answered for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: Option<String>,
}

/// One kind of per-item remote operation.
#[allow(async_fn_in_trait)]
pub trait BatchAction {
    fn kind(&self) -> BatchKind;

    /// Load anything the item needs before it is processed, such as its
    /// install-time prompts.
    async fn prepare(&self, _item: &mut CatalogItem) -> Result<()> {
        Ok(())
    }

    /// Issue the remote call for `item`.
    async fn perform(
        &self,
        item: &CatalogItem,
        answers: &AnswerRecord,
        extra: &AnswerRecord,
    ) -> Result<ActionOutcome>;
}

/// Run `action` over `items` and return one record per item, in order.
///
/// # Errors
///
/// Only terminal failures while asking an item's extra prompts.
pub async fn run_batch<P, V, D, A, R>(
    flow: &QuestionFlow<'_, P, V, D, R>,
    action: &A,
    items: Vec<CatalogItem>,
    answers: &AnswerRecord,
) -> Result<Vec<InstallationRecord>>
where
    P: Prompter,
    V: AnswerValidator,
    D: DefaultResolver,
    R: ProgressReporter,
    A: BatchAction,
{
    let kind = action.kind();
    let mut ledger = BatchLedger::new(
        kind,
        items.iter().map(|i| (i.id.as_str(), i.display_name.as_str())),
    );
    let prompter = flow.prompter();

    for (index, mut item) in items.into_iter().enumerate() {
        ledger.update(index, ItemStatus::InProgress, None);
        show_table(prompter, &ledger);

        let (status, url) = process_item(flow, action, &mut item, answers).await?;
        tracing::info!(id = %item.id, name = %item.display_name, ?status, "batch item finished");
        report_item(flow.reporter(), kind, &item.display_name, &status);
        ledger.update(index, status, url);
    }
    Ok(ledger.into_records())
}

/// Close the item's progress line.
fn report_item(reporter: &impl ProgressReporter, kind: BatchKind, name: &str, status: &ItemStatus) {
    match status {
        ItemStatus::Succeeded => reporter.success(&format!("{name}: {}", kind.succeeded())),
        ItemStatus::Failed(reason) => reporter.warn(&format!("{name}: {} ({reason})", kind.failed())),
        ItemStatus::Pending | ItemStatus::InProgress => {}
    }
}

async fn process_item<P, V, D, A, R>(
    flow: &QuestionFlow<'_, P, V, D, R>,
    action: &A,
    item: &mut CatalogItem,
    answers: &AnswerRecord,
) -> Result<(ItemStatus, Option<String>)>
where
    P: Prompter,
    V: AnswerValidator,
    D: DefaultResolver,
    R: ProgressReporter,
    A: BatchAction,
{
    if let Err(e) = action.prepare(item).await {
        tracing::warn!(id = %item.id, error = %e, "could not prepare batch item");
        return Ok((ItemStatus::Failed(TRANSPORT_FAILURE.to_string()), None));
    }

    let extra = if item.extra_prompts.is_empty() {
        AnswerRecord::new()
    } else {
        let prompter = flow.prompter();
        prompter.notice("");
        prompter.notice("This app requires some extra information from you");
        prompter.notice("Please answer the following questions");
        prompter.notice("");
        flow.collect(&item.extra_prompts, &AnswerRecord::new()).await?
    };

    flow.reporter()
        .step(&format!("{}: {}", item.display_name, action.kind().in_progress()));
    Ok(match action.perform(item, answers, &extra).await {
        Ok(outcome) if outcome.success => {
            let url = match action.kind() {
                BatchKind::Install => answers
                    .text("domain")
                    .map(|domain| access_url(&item.display_name, domain)),
                BatchKind::Delete => None,
            };
            (ItemStatus::Succeeded, url)
        }
        Ok(outcome) => (
            ItemStatus::Failed(
                outcome
                    .message
                    .unwrap_or_else(|| REMOTE_FAILURE.to_string()),
            ),
            None,
        ),
        Err(e) => {
            tracing::warn!(id = %item.id, error = %e, "batch call failed");
            (ItemStatus::Failed(TRANSPORT_FAILURE.to_string()), None)
        }
    })
}

fn show_table(prompter: &impl Prompter, ledger: &BatchLedger) {
    prompter.clear();
    for line in ledger.table() {
        prompter.notice(&line);
    }
}

/// Final table plus the count line. Returns the totals.
pub fn report(prompter: &impl Prompter, kind: BatchKind, records: &[InstallationRecord]) -> BatchSummary {
    prompter.clear();
    for line in crate::domain::batch::table_lines(kind, records) {
        prompter.notice(&line);
    }
    let summary = BatchSummary::of(kind, records);
    prompter.notice("");
    prompter.notice(&summary.to_string());
    prompter.notice("");
    summary
}

// ── Actions ───────────────────────────────────────────────────────────────────

/// Install a catalog app, asking its declared prompts first.
pub struct CatalogInstall<'a, C, B> {
    catalog: &'a C,
    backend: &'a B,
}

impl<'a, C: CatalogSource, B: AppBackend> CatalogInstall<'a, C, B> {
    pub fn new(catalog: &'a C, backend: &'a B) -> Self {
        Self { catalog, backend }
    }
}

/// Install request for `item`: the install-relevant answers plus the item's
/// own prompt answers.
#[must_use]
pub fn install_request(item: &CatalogItem, answers: &AnswerRecord, extra: &AnswerRecord) -> InstallRequest {
    let context = answers
        .only(INSTALL_CONTEXT_KEYS)
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_json()))
        .collect();
    let questions: BTreeMap<String, String> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    InstallRequest {
        id: item.id.clone(),
        context,
        questions,
    }
}

impl<C: CatalogSource, B: AppBackend> BatchAction for CatalogInstall<'_, C, B> {
    fn kind(&self) -> BatchKind {
        BatchKind::Install
    }

    async fn prepare(&self, item: &mut CatalogItem) -> Result<()> {
        let details = self.catalog.app_details(&item.id).await?;
        item.extra_prompts = details
            .prompts()
            .iter()
            .map(|p| QuestionNode::text(&p.name, &p.question))
            .collect();
        Ok(())
    }

    async fn perform(
        &self,
        item: &CatalogItem,
        answers: &AnswerRecord,
        extra: &AnswerRecord,
    ) -> Result<ActionOutcome> {
        let reply = self
            .backend
            .install(&install_request(item, answers, extra))
            .await?;
        Ok(ActionOutcome {
            success: reply.installed,
            message: reply.message,
        })
    }
}

/// Install one app of the backend's setup plan.
pub struct PlannedInstall<'a, B> {
    backend: &'a B,
}

impl<'a, B: AppBackend> PlannedInstall<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }
}

impl<B: AppBackend> BatchAction for PlannedInstall<'_, B> {
    fn kind(&self) -> BatchKind {
        BatchKind::Install
    }

    async fn perform(
        &self,
        item: &CatalogItem,
        answers: &AnswerRecord,
        _extra: &AnswerRecord,
    ) -> Result<ActionOutcome> {
        let reply = self
            .backend
            .setup_app(&item.id, &setup_app_request(answers))
            .await?;
        Ok(ActionOutcome {
            success: reply.installed,
            message: reply.message,
        })
    }
}

/// Delete an installed container.
pub struct Removal<'a, B> {
    backend: &'a B,
}

impl<'a, B: AppBackend> Removal<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }
}

impl<B: AppBackend> BatchAction for Removal<'_, B> {
    fn kind(&self) -> BatchKind {
        BatchKind::Delete
    }

    async fn perform(
        &self,
        item: &CatalogItem,
        _answers: &AnswerRecord,
        _extra: &AnswerRecord,
    ) -> Result<ActionOutcome> {
        let reply = self.backend.delete(&item.id).await?;
        Ok(ActionOutcome {
            success: reply.deleted,
            message: reply.message,
        })
    }
}
