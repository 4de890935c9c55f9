//! Per-item status tracking for install and delete batches.

use std::fmt;

/// What a batch does to each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Install,
    Delete,
}

impl BatchKind {
    #[must_use]
    pub fn in_progress(self) -> &'static str {
        match self {
            Self::Install => "Installing...",
            Self::Delete => "Deleting...",
        }
    }

    #[must_use]
    pub fn succeeded(self) -> &'static str {
        match self {
            Self::Install => "Successfully Installed",
            Self::Delete => "Successfully Deleted",
        }
    }

    #[must_use]
    pub fn failed(self) -> &'static str {
        match self {
            Self::Install => "Installation Failed",
            Self::Delete => "Deletion Failed",
        }
    }

    /// Question asked once a batch finishes.
    #[must_use]
    pub fn repeat_prompt(self) -> &'static str {
        match self {
            Self::Install => "Would you like to install more Apps?",
            Self::Delete => "Would you like to delete more Apps?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    InProgress,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationRecord {
    pub id: String,
    pub label: String,
    pub status: ItemStatus,
    /// Where a successfully installed app can be reached.
    pub access_url: Option<String>,
}

impl InstallationRecord {
    /// Status line as shown in the batch table.
    #[must_use]
    pub fn status_line(&self, kind: BatchKind) -> String {
        match &self.status {
            ItemStatus::Pending => format!("{}: Queued", self.label),
            ItemStatus::InProgress => format!("{}: {}", self.label, kind.in_progress()),
            ItemStatus::Succeeded => format!("{}: {}", self.label, kind.succeeded()),
            ItemStatus::Failed(reason) => format!("{}: {} ({reason})", self.label, kind.failed()),
        }
    }
}

/// The records of one batch run. Created fresh for every run.
#[derive(Debug, Clone)]
pub struct BatchLedger {
    kind: BatchKind,
    records: Vec<InstallationRecord>,
}

impl BatchLedger {
    /// Every item starts out `Pending`, in the given order.
    pub fn new<'a>(kind: BatchKind, items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let records = items
            .into_iter()
            .map(|(id, label)| InstallationRecord {
                id: id.to_string(),
                label: label.to_string(),
                status: ItemStatus::Pending,
                access_url: None,
            })
            .collect();
        Self { kind, records }
    }

    #[must_use]
    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    /// The single mutation point for record status.
    ///
    /// Records are addressed by position: a batch may list the same id twice.
    pub fn update(&mut self, index: usize, status: ItemStatus, access_url: Option<String>) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = status;
            record.access_url = access_url;
        }
    }

    #[must_use]
    pub fn records(&self) -> &[InstallationRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<InstallationRecord> {
        self.records
    }

    /// Lines for the status table: every item that has been started.
    #[must_use]
    pub fn table(&self) -> Vec<String> {
        table_lines(self.kind, &self.records)
    }
}

/// Status table for the started records (pending ones are not shown).
#[must_use]
pub fn table_lines(kind: BatchKind, records: &[InstallationRecord]) -> Vec<String> {
    let mut lines = Vec::new();
    for record in records.iter().filter(|r| r.status != ItemStatus::Pending) {
        lines.push(record.status_line(kind));
        if let Some(url) = &record.access_url {
            lines.push(format!("Accessible at: {url}"));
            lines.push(String::new());
        }
    }
    lines
}

/// Totals of a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub kind: BatchKind,
    pub total: usize,
    pub succeeded: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn of(kind: BatchKind, records: &[InstallationRecord]) -> Self {
        Self {
            kind,
            total: records.len(),
            succeeded: records
                .iter()
                .filter(|r| r.status == ItemStatus::Succeeded)
                .count(),
        }
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} queued – {} {}",
            self.total,
            self.succeeded,
            self.kind.succeeded()
        )
    }
}

/// `https://<name>.<domain>`
#[must_use]
pub fn access_url(name: &str, domain: &str) -> String {
    format!("https://{name}.{domain}")
}
