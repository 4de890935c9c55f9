//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the shared wire types,
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::net::IpAddr;

use anyhow::Result;
use appdock_common::{
    AppDetails, CatalogPage, ContainerAction, DeleteReply, DnsRecord, InstallReply,
    InstallRequest, InstalledListing, SetupAppRequest, SetupPlan, SetupRequest,
};

use crate::domain::SettingRecord;

// ── Validation Ports ──────────────────────────────────────────────────────────

/// Name resolution and public address detection.
#[allow(async_fn_in_trait)]
pub trait DomainResolver {
    /// Resolve `domain` to its first IPv4 address.
    async fn resolve(&self, domain: &str) -> Result<IpAddr>;
    /// The public IPv4 address this server is reachable on.
    async fn current_public_ip(&self) -> Result<IpAddr>;
}

/// DNS provider account lookup.
#[allow(async_fn_in_trait)]
pub trait AccountChecker {
    /// Returns `true` when the provider accepts `email` + `key`.
    async fn check_credential(&self, email: &str, key: &str) -> Result<bool>;
}

/// DNS provider zone lookup.
#[allow(async_fn_in_trait)]
pub trait ZoneLookup {
    /// List the records of `zone_id` whose name matches `domain`.
    async fn list_dns_records(
        &self,
        zone_id: &str,
        domain: &str,
        email: &str,
        key: &str,
    ) -> Result<Vec<DnsRecord>>;
}

// ── Catalog and Backend Ports ─────────────────────────────────────────────────

/// The public, paginated app catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetch catalog page `page` (1-based).
    async fn list_catalog(&self, page: u32) -> Result<CatalogPage>;
    /// Fetch one app's detail, including any install-time prompts.
    async fn app_details(&self, id: &str) -> Result<AppDetails>;
}

/// The local backend that owns the container runtime.
#[allow(async_fn_in_trait)]
pub trait AppBackend {
    /// List containers currently present on the server.
    async fn list_installed(&self) -> Result<InstalledListing>;
    /// Install one catalog app.
    async fn install(&self, request: &InstallRequest) -> Result<InstallReply>;
    /// Remove one container.
    async fn delete(&self, id: &str) -> Result<DeleteReply>;
    /// Apply a lifecycle action to one container.
    async fn container_action(&self, id: &str, action: ContainerAction) -> Result<()>;
    /// Ask the backend which apps the initial setup should install.
    async fn setup_plan(&self, request: &SetupRequest) -> Result<SetupPlan>;
    /// Install one app of the setup plan.
    async fn setup_app(&self, app: &str, request: &SetupAppRequest) -> Result<InstallReply>;
}

// ── Settings Port ─────────────────────────────────────────────────────────────

/// Durable key/value persistence for accepted answers.
#[allow(async_fn_in_trait)]
pub trait SettingsStore {
    /// Every stored setting, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached at all.
    async fn find_all(&self) -> Result<Vec<SettingRecord>>;
    /// The setting called `name`, if any.
    async fn find_one(&self, name: &str) -> Result<Option<SettingRecord>>;
    /// Insert `record`, or replace the value of the setting with its name.
    async fn upsert(&self, record: &SettingRecord) -> Result<()>;
}

// ── Interaction Ports ─────────────────────────────────────────────────────────

/// Interactive terminal. Sync trait: prompts block on operator input.
pub trait Prompter {
    /// Pick one of `items`; returns the chosen index.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize>;
    /// Read a line of text, offering `default` when given.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;
    /// Yes / no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
    /// Show a plain message (rejections, headers, status lines).
    fn notice(&self, message: &str);
    /// Show a two-column table.
    fn table(&self, rows: &[(String, String)]);
    /// Start a fresh screen.
    fn clear(&self);
}

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
///
/// Every `step` is closed by a `success` or `warn` before the next prompt.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
