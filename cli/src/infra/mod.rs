//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: HTTP calls to the backend,
//! the catalog and the DNS provider, name resolution, and the settings file.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod cloudflare;
pub mod config;
pub mod dns;
pub mod http;
pub mod settings;
