//! System resolver plus a public-address echo service.

use std::net::IpAddr;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::application::ports::DomainResolver;
use crate::domain::RemoteError;

/// Resolves names with the OS resolver and asks `public_ip_url` for our address.
pub struct SystemResolver {
    client: Client,
    public_ip_url: String,
}

impl SystemResolver {
    #[must_use]
    pub fn new(client: Client, public_ip_url: impl Into<String>) -> Self {
        Self {
            client,
            public_ip_url: public_ip_url.into(),
        }
    }
}

/// First IPv4 address in `addrs`.
pub(crate) fn first_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Option<IpAddr> {
    addrs.into_iter().find(IpAddr::is_ipv4)
}

impl DomainResolver for SystemResolver {
    async fn resolve(&self, domain: &str) -> Result<IpAddr> {
        let addrs = tokio::net::lookup_host((domain, 0))
            .await
            .with_context(|| format!("cannot resolve {domain}"))?;
        first_ipv4(addrs.map(|a| a.ip()))
            .ok_or_else(|| RemoteError::Unresolved(domain.to_string()).into())
    }

    async fn current_public_ip(&self) -> Result<IpAddr> {
        let body = self
            .client
            .get(&self.public_ip_url)
            .send()
            .await
            .context("public IP lookup failed")?
            .error_for_status()
            .context("public IP lookup failed")?
            .text()
            .await
            .context("public IP lookup returned no body")?;
        body.trim()
            .parse()
            .with_context(|| format!("public IP lookup returned '{}'", body.trim()))
    }
}
