//! Domain types for appdock configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.appdock/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppdockConfig {
    /// Base URL of the local backend that manages containers.
    pub backend_url: String,
    /// Base URL of the public app catalog.
    pub catalog_url: String,
    /// Base URL of the DNS provider API.
    pub dns_api_url: String,
    /// Plain-text endpoint returning the caller's public IPv4 address.
    pub public_ip_url: String,
    /// Settings file; defaults to `~/.appdock/settings.yaml` when unset.
    pub settings_path: Option<String>,
    /// Timeout applied to every remote call.
    pub request_timeout_secs: u64,
}

impl Default for AppdockConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:4000".to_string(),
            catalog_url: "https://api.sudobox.io/v1".to_string(),
            dns_api_url: "https://api.cloudflare.com/client/v4".to_string(),
            public_ip_url: "https://api.ipify.org".to_string(),
            settings_path: None,
            request_timeout_secs: 120,
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Checks that every URL is absolute http(s) and the timeout is non-zero.
///
/// # Errors
///
/// Returns an error naming the first offending field.
pub fn validate_config(config: &AppdockConfig) -> Result<()> {
    for (key, value) in [
        ("backend_url", &config.backend_url),
        ("catalog_url", &config.catalog_url),
        ("dns_api_url", &config.dns_api_url),
        ("public_ip_url", &config.public_ip_url),
    ] {
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                key: key.to_string(),
                value: value.clone(),
            }
            .into());
        }
    }
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout.into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
