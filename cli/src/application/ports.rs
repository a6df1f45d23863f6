//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and shared types — never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use cradle_common::{Command, ProjectTemplate, Workspace, WorkspaceConfig, WorkspaceStatus};

use crate::domain::CradleConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Extra options for workspace creation.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Workspace attributes, sent as `key:value` pairs.
    pub attributes: BTreeMap<String, String>,
}

// ── Workspace API Port ────────────────────────────────────────────────────────

/// Remote workspace-management API.
///
/// Every call is an opaque remote procedure call: success or an error.
#[allow(async_fn_in_trait)]
pub trait WorkspaceApi {
    /// Create a workspace from `config` under `namespace`.
    async fn create_from_config(
        &self,
        namespace: &str,
        config: &WorkspaceConfig,
        options: &CreateOptions,
    ) -> Result<Workspace>;
    /// Start the workspace in environment `env_name`. Returns once accepted.
    async fn start(&self, workspace_id: &str, env_name: &str) -> Result<()>;
    /// Resolve once the workspace has been observed in `target` status.
    async fn fetch_status_change(&self, workspace_id: &str, target: WorkspaceStatus)
    -> Result<()>;
    /// Fetch the full, current workspace description.
    async fn fetch_details(&self, workspace_id: &str) -> Result<Workspace>;
    /// List workspaces of a namespace. May be denied for foreign namespaces.
    async fn list_by_namespace(&self, namespace: &str) -> Result<Vec<Workspace>>;
    /// List workspaces owned by the current user.
    async fn list_owned(&self) -> Result<Vec<Workspace>>;
    /// Register a command in the workspace.
    async fn add_command(&self, workspace_id: &str, command: &Command) -> Result<()>;
}

// ── Project Agent Ports ───────────────────────────────────────────────────────

/// Project-tree agent of a single running workspace.
#[allow(async_fn_in_trait)]
pub trait ProjectAgent {
    /// Create all project entries in one bulk request.
    async fn create_projects(&self, templates: &[ProjectTemplate]) -> Result<()>;
}

/// Project-type resolution service of a single running workspace.
#[allow(async_fn_in_trait)]
pub trait ProjectTypeResolver {
    /// Detect and apply the project type of an imported project.
    async fn resolve_type(&self, template: &ProjectTemplate) -> Result<()>;
}

/// Hands out the agent of a running workspace.
pub trait AgentConnector {
    /// Agent bound to one workspace.
    type Agent: ProjectAgent + ProjectTypeResolver;

    /// Connect to the agent of `workspace`, using its runtime details.
    ///
    /// # Errors
    ///
    /// Returns an error if the workspace exposes no agent endpoint.
    fn connect(&self, workspace: &Workspace) -> Result<Self::Agent>;
}

// ── Template Catalog Port ─────────────────────────────────────────────────────

/// Read-only source of project templates.
#[allow(async_fn_in_trait)]
pub trait TemplateSource {
    /// All templates of the catalog, in catalog order.
    async fn templates(&self) -> Result<Vec<ProjectTemplate>>;
}

// ── Navigation Port ───────────────────────────────────────────────────────────

/// Navigation sink that displays the IDE. Sync trait — no async needed.
pub trait Navigator {
    /// Show the IDE at `path`.
    fn navigate(&self, path: &str);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<CradleConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &CradleConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
