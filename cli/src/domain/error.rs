//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Project creation errors ───────────────────────────────────────────────────

/// Outcome of a failed bulk project creation.
///
/// `NothingToCreate` is an input-contract sentinel, not a remote failure:
/// callers must tell the two apart.
#[derive(Debug, Error)]
pub enum CreationError {
    #[error("No projects to create.")]
    NothingToCreate,

    #[error("Creating projects in workspace '{workspace_id}' failed: {reason}")]
    Request { workspace_id: String, reason: String },
}

// ── Workspace directory errors ────────────────────────────────────────────────

/// Errors raised while resolving the workspaces of a namespace.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(
        "Cannot list workspaces of namespace '{namespace}'.\n\nNamespace listing: {scoped}\nOwned listing: {owned}"
    )]
    Unavailable {
        namespace: String,
        scoped: String,
        owned: String,
    },
}

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Hard-stop errors of the provisioning pipeline that callers may match on.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Workspace '{workspace_id}' did not reach RUNNING within {timeout_secs}s.")]
    RunningTimeout {
        workspace_id: String,
        timeout_secs: u64,
    },

    #[error(
        "Workspace '{workspace_id}' has no project agent endpoint. Is the ws-agent installed in the dev machine?"
    )]
    AgentUnavailable { workspace_id: String },
}

// ── Template errors ───────────────────────────────────────────────────────────

/// Errors related to project template selection.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Unknown template '{name}'. Available: {available}")]
    UnknownTemplate { name: String, available: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
