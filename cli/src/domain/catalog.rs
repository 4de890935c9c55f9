//! Catalog items, the cross-page selection set, and screen composition.
//!
//! Everything here is pure: the application layer fetches the live catalog
//! page and installed listing, builds a [`PageView`], and renders it into a
//! [`Screen`] for the prompter.

use std::collections::HashSet;

use appdock_common::{CatalogPage, Container, InstalledListing};

use crate::domain::question::QuestionNode;

pub const INSTALLED_MARK: &str = "✔️";
pub const NOT_INSTALLED_MARK: &str = "❌";
pub const SELECTED_MARK: &str = "✅";

/// Containers per page on the delete screen.
pub const REMOVAL_PAGE_SIZE: usize = 10;

/// One installable (or removable) unit.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub id: String,
    pub display_name: String,
    /// Items marked installed cannot be selected.
    pub installed: bool,
    /// Per-item questions answered right before the item is processed.
    pub extra_prompts: Vec<QuestionNode>,
}

impl CatalogItem {
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            installed: false,
            extra_prompts: Vec::new(),
        }
    }
}

/// Names of the apps currently running as containers.
#[must_use]
pub fn installed_names(listing: &InstalledListing) -> HashSet<String> {
    listing
        .results
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

// ── Selection ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub id: String,
    pub name: String,
}

/// Items chosen across any number of pages, in the order they were chosen.
///
/// Equality compares membership only; iteration order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    entries: Vec<SelectionEntry>,
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.iter().all(|e| other.contains(&e.id))
    }
}

impl Eq for SelectionSet {}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Items ready to hand to the orchestrator, in selection order.
    #[must_use]
    pub fn into_items(self) -> Vec<CatalogItem> {
        self.entries
            .into_iter()
            .map(|e| CatalogItem::new(e.id, e.name))
            .collect()
    }
}

/// Flip `item`'s membership. Installed items are left alone.
#[must_use]
pub fn toggle(mut selection: SelectionSet, item: &CatalogItem) -> SelectionSet {
    if item.installed {
        return selection;
    }
    if selection.contains(&item.id) {
        selection.entries.retain(|e| e.id != item.id);
    } else {
        selection.entries.push(SelectionEntry {
            id: item.id.clone(),
            name: item.display_name.clone(),
        });
    }
    selection
}

// ── Pages ───────────────────────────────────────────────────────────────────

/// What the screen is selecting items for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Install,
    Delete,
}

/// One live page of items plus its position in the listing.
#[derive(Debug, Clone)]
pub struct PageView {
    pub mode: SelectionMode,
    /// 1-based.
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub items: Vec<CatalogItem>,
}

impl PageView {
    /// Catalog page with install state taken from the installed names.
    #[must_use]
    pub fn catalog(page: u32, live: &CatalogPage, installed: &HashSet<String>) -> Self {
        let items = live
            .results
            .iter()
            .map(|app| CatalogItem {
                installed: installed.contains(&app.name),
                ..CatalogItem::new(app.id.clone(), app.name.clone())
            })
            .collect();
        Self {
            mode: SelectionMode::Install,
            page,
            total_pages: live.total_pages,
            total_items: live.total_apps,
            items,
        }
    }

    /// Page `page` of the installed containers, chunked locally.
    #[must_use]
    pub fn removal(page: u32, containers: &[Container]) -> Self {
        let total_pages = containers.len().div_ceil(REMOVAL_PAGE_SIZE).max(1);
        let index = (page.max(1) as usize - 1).min(total_pages - 1);
        let items = containers
            .chunks(REMOVAL_PAGE_SIZE)
            .nth(index)
            .unwrap_or_default()
            .iter()
            .map(|c| CatalogItem::new(c.id.clone(), c.name()))
            .collect();
        Self {
            mode: SelectionMode::Delete,
            page: u32::try_from(index + 1).unwrap_or(u32::MAX),
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            total_items: u32::try_from(containers.len()).unwrap_or(u32::MAX),
            items,
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// An entry the operator can pick on a selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Index into [`PageView::items`].
    Item(usize),
    PreviousPage,
    NextPage,
    /// Hand the selection to the orchestrator (install or delete).
    Submit,
    Back,
    Exit,
}

/// Rendered screen: header lines plus parallel label/choice lists.
#[derive(Debug, Clone)]
pub struct Screen {
    pub header: Vec<String>,
    pub labels: Vec<String>,
    pub choices: Vec<Choice>,
}

/// Label for one item given its install and selection state.
#[must_use]
pub fn item_label(mode: SelectionMode, item: &CatalogItem, selected: bool) -> String {
    match mode {
        SelectionMode::Install if item.installed => {
            format!("{} {INSTALLED_MARK}", item.display_name)
        }
        SelectionMode::Install if selected => {
            format!("{} {NOT_INSTALLED_MARK} {SELECTED_MARK}", item.display_name)
        }
        SelectionMode::Install => format!("{} {NOT_INSTALLED_MARK}", item.display_name),
        SelectionMode::Delete if selected => format!("{} {SELECTED_MARK}", item.display_name),
        SelectionMode::Delete => item.display_name.clone(),
    }
}

#[must_use]
pub fn render(view: &PageView, selection: &SelectionSet) -> Screen {
    let mut header = Vec::new();
    match view.mode {
        SelectionMode::Install => {
            header.push(format!(
                "Page: {} / {} | {} available",
                view.page, view.total_pages, view.total_items
            ));
            header.push(String::new());
            header.push(format!("{INSTALLED_MARK}  Installed"));
            header.push(format!("{NOT_INSTALLED_MARK}  Not Installed"));
            header.push(format!("{SELECTED_MARK}  Selected"));
        }
        SelectionMode::Delete => {
            header.push(format!(
                "Page: {} / {} | {} Apps installed!",
                view.page, view.total_pages, view.total_items
            ));
            header.push(String::new());
            header.push(format!("{SELECTED_MARK}  Selected"));
        }
    }
    if !selection.is_empty() {
        header.push(String::new());
        header.push(format!("{} Selected", selection.len()));
    }

    let mut labels = Vec::new();
    let mut choices = Vec::new();
    for (i, item) in view.items.iter().enumerate() {
        labels.push(item_label(view.mode, item, selection.contains(&item.id)));
        choices.push(Choice::Item(i));
    }
    if view.total_pages > 1 {
        if view.has_previous() {
            labels.push("Page <".to_string());
            choices.push(Choice::PreviousPage);
        }
        if view.has_next() {
            labels.push("Page >".to_string());
            choices.push(Choice::NextPage);
        }
    }
    if !selection.is_empty() {
        labels.push(
            match view.mode {
                SelectionMode::Install => "Install",
                SelectionMode::Delete => "Delete",
            }
            .to_string(),
        );
        choices.push(Choice::Submit);
    }
    labels.push("Back".to_string());
    choices.push(Choice::Back);
    labels.push("Exit".to_string());
    choices.push(Choice::Exit);

    Screen {
        header,
        labels,
        choices,
    }
}
