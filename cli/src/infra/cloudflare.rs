//! DNS provider API: account and zone lookups used while validating answers.

use anyhow::Result;
use appdock_common::{ApiEnvelope, DnsRecord};
use reqwest::Client;
use serde_json::Value;

use crate::application::ports::{AccountChecker, ZoneLookup};
use crate::domain::RemoteError;
use crate::infra::http::send_json;

const SERVICE: &str = "dns provider";

/// Cloudflare v4 API authenticated with a global key.
pub struct CloudflareApi {
    client: Client,
    base_url: String,
}

impl CloudflareApi {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl AccountChecker for CloudflareApi {
    async fn check_credential(&self, email: &str, key: &str) -> Result<bool> {
        let request = self
            .client
            .get(format!("{}/user", self.base_url))
            .header("X-Auth-Email", email)
            .header("X-Auth-Key", key);
        match send_json::<ApiEnvelope<Value>>(SERVICE, request).await {
            Ok(envelope) => Ok(envelope.success),
            // The provider answers 4xx for unknown credentials.
            Err(e) if is_client_error(&e) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl ZoneLookup for CloudflareApi {
    async fn list_dns_records(
        &self,
        zone_id: &str,
        domain: &str,
        email: &str,
        key: &str,
    ) -> Result<Vec<DnsRecord>> {
        let request = self
            .client
            .get(format!("{}/zones/{zone_id}/dns_records", self.base_url))
            .query(&[("name", domain)])
            .header("X-Auth-Email", email)
            .header("X-Auth-Key", key);
        let envelope = match send_json::<ApiEnvelope<Vec<DnsRecord>>>(SERVICE, request).await {
            Ok(envelope) => envelope,
            Err(e) if is_client_error(&e) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        if !envelope.success {
            return Ok(Vec::new());
        }
        envelope
            .result
            .ok_or_else(|| RemoteError::Empty { service: SERVICE }.into())
    }
}

fn is_client_error(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<RemoteError>(),
        Some(RemoteError::Status { status, .. }) if (400..500).contains(status)
    )
}
