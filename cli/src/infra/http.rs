//! HTTP implementations of the `AppBackend` and `CatalogSource` ports.

use std::time::Duration;

use anyhow::{Context, Result};
use appdock_common::{
    AppDetails, CatalogPage, ContainerAction, ContainerActionRequest, DeleteReply, DeleteRequest,
    InstallReply, InstallRequest, InstalledListing, SetupAppRequest, SetupPlan, SetupRequest,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::application::ports::{AppBackend, CatalogSource};
use crate::domain::RemoteError;

/// Build a client with the configured per-request timeout.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("appdock/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to create HTTP client")
}

/// Send `request` and decode a JSON body, mapping non-2xx to [`RemoteError::Status`].
pub(crate) async fn send_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .with_context(|| format!("{service} request failed"))?;
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            service,
            status: status.as_u16(),
        }
        .into());
    }
    response
        .json::<T>()
        .await
        .with_context(|| format!("{service} returned an unexpected body"))
}

fn join(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

// ── Backend ───────────────────────────────────────────────────────────────────

/// The local container backend.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        join(&self.base_url, path)
    }
}

impl AppBackend for HttpBackend {
    async fn list_installed(&self) -> Result<InstalledListing> {
        send_json("backend", self.client.get(self.url("/apps"))).await
    }

    async fn install(&self, request: &InstallRequest) -> Result<InstallReply> {
        tracing::debug!(id = %request.id, "POST /apps");
        send_json("backend", self.client.post(self.url("/apps")).json(request)).await
    }

    async fn delete(&self, id: &str) -> Result<DeleteReply> {
        tracing::debug!(%id, "DELETE /apps");
        let body = DeleteRequest { id: id.to_string() };
        send_json("backend", self.client.delete(self.url("/apps")).json(&body)).await
    }

    async fn container_action(&self, id: &str, action: ContainerAction) -> Result<()> {
        let body = ContainerActionRequest {
            id: id.to_string(),
            action,
        };
        let response = self
            .client
            .post(self.url("/apps/action"))
            .json(&body)
            .send()
            .await
            .context("backend request failed")?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                service: "backend",
                status: status.as_u16(),
            }
            .into());
        }
        Ok(())
    }

    async fn setup_plan(&self, request: &SetupRequest) -> Result<SetupPlan> {
        send_json("backend", self.client.post(self.url("/setup")).json(request)).await
    }

    async fn setup_app(&self, app: &str, request: &SetupAppRequest) -> Result<InstallReply> {
        tracing::debug!(%app, "POST /setup");
        let url = self.url(&format!("/setup/{app}"));
        send_json("backend", self.client.post(url).json(request)).await
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// The public app catalog.
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl CatalogSource for HttpCatalog {
    async fn list_catalog(&self, page: u32) -> Result<CatalogPage> {
        let url = join(&self.base_url, "/apps");
        send_json(
            "catalog",
            self.client.get(url).query(&[("page", page.to_string())]),
        )
        .await
    }

    async fn app_details(&self, id: &str) -> Result<AppDetails> {
        let url = join(&self.base_url, &format!("/apps/{id}"));
        send_json("catalog", self.client.get(url)).await
    }
}
