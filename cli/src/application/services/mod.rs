//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`: never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod app_sessions;
pub mod catalog_selection;
pub mod defaults;
pub mod orchestrator;
pub mod question_flow;
pub mod settings_editor;
pub mod setup_wizard;
pub mod validation;

/// How an interactive screen was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Return control to the caller.
    Back,
    /// Terminate the process.
    Exit,
}
