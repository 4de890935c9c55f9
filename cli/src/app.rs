//! Application context: unified state passed to every command handler.
//!
//! `AppContext` owns the loaded configuration, one adapter per port, and
//! the terminal output context. Command handlers borrow it and build the
//! short-lived prompter, validator and reporter they need from it.

use anyhow::Result;

use crate::application::services::defaults::StoredDefaults;
use crate::application::services::validation::RemoteValidator;
use crate::domain::AppdockConfig;
use crate::infra::cloudflare::CloudflareApi;
use crate::infra::config::YamlConfigLoader;
use crate::infra::dns::SystemResolver;
use crate::infra::http::{self, HttpBackend, HttpCatalog};
use crate::infra::settings::YamlSettingsStore;
use crate::output::{OutputContext, TerminalPrompter, TerminalReporter};

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Effective configuration after file and environment overrides.
    pub config: AppdockConfig,
    /// Local container backend.
    pub backend: HttpBackend,
    /// Public app catalog.
    pub catalog: HttpCatalog,
    /// DNS provider API (account and zone checks).
    pub dns_api: CloudflareApi,
    /// Name resolution and public IP detection.
    pub resolver: SystemResolver,
    /// Persisted answers.
    pub settings: YamlSettingsStore,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the HTTP client
    /// cannot be built, or the home directory cannot be determined.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let config = YamlConfigLoader.load()?;
        let client = http::client(config.request_timeout_secs)?;
        tracing::debug!(
            backend = %config.backend_url,
            catalog = %config.catalog_url,
            "configuration loaded"
        );

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            backend: HttpBackend::new(client.clone(), config.backend_url.clone()),
            catalog: HttpCatalog::new(client.clone(), config.catalog_url.clone()),
            dns_api: CloudflareApi::new(client.clone(), config.dns_api_url.clone()),
            resolver: SystemResolver::new(client, config.public_ip_url.clone()),
            settings: YamlSettingsStore::new(config.settings_path.as_deref())?,
            config,
        })
    }

    /// Interactive prompts on stdout.
    #[must_use]
    pub fn prompter(&self) -> TerminalPrompter<'_> {
        TerminalPrompter::new(&self.output)
    }

    /// Progress output for long remote calls.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Validator backed by the resolver and the DNS provider.
    #[must_use]
    pub fn validator(&self) -> RemoteValidator<'_, SystemResolver, CloudflareApi, CloudflareApi> {
        RemoteValidator::new(&self.resolver, &self.dns_api, &self.dns_api)
    }

    /// Defaults resolver reading stored settings.
    #[must_use]
    pub fn defaults(&self) -> StoredDefaults<'_, YamlSettingsStore> {
        StoredDefaults::new(&self.settings)
    }
}
