//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Settings errors ───────────────────────────────────────────────────────────

/// Errors raised by the settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings store at {path} is unreachable: {reason}")]
    Unreachable { path: String, reason: String },

    #[error("Could not save setting '{name}': {reason}")]
    WriteFailed { name: String, reason: String },
}

// ── Remote errors ─────────────────────────────────────────────────────────────

/// Errors raised when a remote collaborator answers with something unusable.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    #[error("{service} returned no result")]
    Empty { service: &'static str },

    #[error("{0} did not resolve to an IPv4 address")]
    Unresolved(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}\n\nExpected an absolute http(s) URL")]
    InvalidUrl { key: String, value: String },

    #[error("request_timeout_secs must be greater than zero")]
    InvalidTimeout,
}
