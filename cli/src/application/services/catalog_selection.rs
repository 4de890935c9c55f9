//! Application service: paginated multi-select over live listings.
//!
//! Every screen re-fetches its page, so install state in the labels is
//! current as of that render. The selection itself is an owned value that
//! only [`toggle`] changes; page navigation never touches it. A page that
//! fails to load is reported and offered again instead of ending the run.

use anyhow::{Context, Result};

use crate::application::ports::{AppBackend, CatalogSource, Prompter};
use crate::domain::catalog::{installed_names, render};
use crate::domain::{Choice, PageView, SelectionSet, toggle};

pub const INSTALL_PROMPT: &str = "What app(s) would you like to install";
pub const DELETE_PROMPT: &str = "What app(s) would you like to delete";
pub const RETRY_PROMPT: &str = "Would you like to try again?";

/// How a selection screen was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Operator chose Install / Delete with a non-empty selection.
    Submit(SelectionSet),
    Back,
    Exit,
}

/// Supplies one live page at a time.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn page(&self, page: u32) -> Result<PageView>;
}

/// Catalog pages with install state from the backend's container listing.
pub struct CatalogPages<'a, C, B> {
    catalog: &'a C,
    backend: &'a B,
}

impl<'a, C: CatalogSource, B: AppBackend> CatalogPages<'a, C, B> {
    pub fn new(catalog: &'a C, backend: &'a B) -> Self {
        Self { catalog, backend }
    }
}

impl<C: CatalogSource, B: AppBackend> PageSource for CatalogPages<'_, C, B> {
    async fn page(&self, page: u32) -> Result<PageView> {
        let live = self
            .catalog
            .list_catalog(page)
            .await
            .with_context(|| format!("fetching catalog page {page}"))?;
        let installed = self
            .backend
            .list_installed()
            .await
            .context("listing installed apps")?;
        Ok(PageView::catalog(page, &live, &installed_names(&installed)))
    }
}

/// Installed containers, paged locally.
pub struct InstalledPages<'a, B> {
    backend: &'a B,
}

impl<'a, B: AppBackend> InstalledPages<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }
}

impl<B: AppBackend> PageSource for InstalledPages<'_, B> {
    async fn page(&self, page: u32) -> Result<PageView> {
        let installed = self
            .backend
            .list_installed()
            .await
            .context("listing installed apps")?;
        Ok(PageView::removal(page, &installed.results))
    }
}

/// Run the selection screen until the operator submits, goes back or exits.
///
/// # Errors
///
/// Returns an error if the prompt fails. A listing that cannot be fetched
/// is shown as a notice; declining the retry leaves with
/// [`SelectionOutcome::Back`].
pub async fn choose(
    prompter: &impl Prompter,
    source: &impl PageSource,
    prompt: &str,
) -> Result<SelectionOutcome> {
    let mut selection = SelectionSet::new();
    let mut page = 1;
    loop {
        let view = match source.page(page).await {
            Ok(view) => view,
            Err(e) => {
                tracing::warn!(page, error = %format!("{e:#}"), "could not load listing");
                prompter.notice(&format!("Could not load the app list ({e:#})"));
                if prompter.confirm(RETRY_PROMPT, true)? {
                    continue;
                }
                return Ok(SelectionOutcome::Back);
            }
        };
        let screen = render(&view, &selection);

        prompter.clear();
        for line in &screen.header {
            prompter.notice(line);
        }
        let index = prompter.select(prompt, &screen.labels, 0)?;
        let choice = screen.choices.get(index).copied().unwrap_or(Choice::Back);

        match choice {
            Choice::Item(i) => {
                if let Some(item) = view.items.get(i) {
                    selection = toggle(selection, item);
                }
            }
            Choice::PreviousPage => page = view.page.saturating_sub(1).max(1),
            Choice::NextPage => page = view.page + 1,
            Choice::Submit => return Ok(SelectionOutcome::Submit(selection)),
            Choice::Back => return Ok(SelectionOutcome::Back),
            Choice::Exit => return Ok(SelectionOutcome::Exit),
        }
    }
}
