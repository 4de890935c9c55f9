//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod answers;
pub mod batch;
pub mod catalog;
pub mod config;
pub mod containers;
pub mod error;
pub mod question;
pub mod settings;
pub mod setup;

pub use answers::{AnswerRecord, AnswerValue};
pub use batch::{BatchKind, BatchLedger, BatchSummary, InstallationRecord, ItemStatus};
pub use catalog::{CatalogItem, Choice, PageView, Screen, SelectionMode, SelectionSet, toggle};
pub use config::{AppdockConfig, validate_config};
pub use error::{ConfigError, RemoteError, SettingsError};
pub use question::{DefaultValue, QuestionKind, QuestionNode, Rule, Verdict};
pub use settings::SettingRecord;
