//! Application service — workspace provisioning pipeline.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cradle_common::{ProjectTemplate, Workspace, WorkspaceConfig, WorkspaceStatus};
use serde::Serialize;
use tracing::{info, warn};

use crate::application::ports::{
    AgentConnector, CreateOptions, Navigator, ProgressReporter, WorkspaceApi,
};
use crate::application::services::project_creation::create_projects;
use crate::application::services::project_import::{ProjectImportReport, import_projects};
use crate::application::services::workspace_directory::WorkspaceDirectory;
use crate::domain::{
    BatchOutcome, CreationError, CreationFailurePolicy, ProvisionError, filter_selected, ide_path,
};

/// What to provision.
pub struct ProvisionRequest<'a> {
    /// Namespace the workspace is created under.
    pub namespace: &'a str,
    /// Declarative workspace description.
    pub config: &'a WorkspaceConfig,
    /// Names of the templates to import.
    pub selected: &'a [String],
    /// Template catalog the selection refers to.
    pub available: &'a [ProjectTemplate],
    /// Extra creation options.
    pub create_options: CreateOptions,
}

/// How to provision.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvisionOptions {
    /// Upper bound for the RUNNING wait. `None` waits indefinitely.
    pub running_timeout: Option<Duration>,
    /// Whether a failed bulk creation skips project import.
    pub on_creation_failure: CreationFailurePolicy,
}

/// Outcome of the bulk project creation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CreationStatus {
    /// All projects were created.
    Created { count: usize },
    /// The batch was empty.
    NothingToCreate,
    /// The bulk request failed.
    Failed { reason: String },
}

/// Outcome of the project import step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportStatus {
    /// Every project of the batch went through import.
    Completed(ProjectImportReport),
    /// Import was skipped because creation failed under
    /// [`CreationFailurePolicy::Abort`].
    Skipped,
}

/// Everything the pipeline did, including every failure list.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    /// Workspace details as fetched once it was running.
    pub workspace: Workspace,
    /// Path the IDE was opened at.
    pub ide_path: String,
    /// Names of the projects in the provisioning batch.
    pub projects: Vec<String>,
    pub creation: CreationStatus,
    pub import: ImportStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ProvisionReport {
    /// `true` when no step recorded a failure, swallowed command failures
    /// included.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        let creation_ok = !matches!(self.creation, CreationStatus::Failed { .. });
        let import_ok = match &self.import {
            ImportStatus::Completed(report) => {
                report.outcome == BatchOutcome::Success && report.command_failures.is_empty()
            }
            ImportStatus::Skipped => false,
        };
        creation_ok && import_ok
    }
}

/// Provision a workspace and populate it with the selected projects.
///
/// Steps run strictly in order: create, start, open the IDE, remember the
/// workspace, wait for RUNNING, fetch details, create projects, import
/// projects. The IDE is opened as soon as the start request is accepted,
/// before RUNNING is observed.
///
/// # Errors
///
/// Any failure from creation up to fetching the running workspace's details
/// stops the pipeline and is returned. Project creation and import never
/// fail the call; their failures are returned in the report.
pub async fn provision<C>(
    api: &C,
    directory: &mut WorkspaceDirectory,
    navigator: &impl Navigator,
    reporter: &impl ProgressReporter,
    request: ProvisionRequest<'_>,
    opts: ProvisionOptions,
) -> Result<ProvisionReport>
where
    C: WorkspaceApi + AgentConnector,
{
    let started_at = Utc::now();
    let ProvisionRequest {
        namespace,
        config,
        selected,
        available,
        create_options,
    } = request;

    // Step 1: Build the provisioning batch.
    let batch = filter_selected(available, selected);

    // Step 2: Create the workspace.
    reporter.step(&format!("creating workspace '{}'...", config.name));
    let workspace = api
        .create_from_config(namespace, config, &create_options)
        .await
        .with_context(|| format!("creating workspace '{}' in namespace '{namespace}'", config.name))?;
    info!(workspace_id = %workspace.id, namespace, "workspace created");

    // Step 3: Start it in its default environment.
    reporter.step("starting workspace...");
    api.start(&workspace.id, &workspace.config.default_env)
        .await
        .with_context(|| format!("starting workspace '{}'", workspace.id))?;

    // Step 4: Open the IDE.
    let ide_path = ide_path(namespace, &workspace);
    navigator.navigate(&ide_path);

    // Step 5: Remember the workspace and watch its status.
    directory.remember(workspace.clone());

    // Step 6: Wait for RUNNING.
    reporter.step("waiting for workspace to be running...");
    wait_running(api, &workspace.id, opts.running_timeout).await?;
    reporter.success("workspace running");

    // Step 7: Fetch the running workspace and reach its agent.
    let workspace = api
        .fetch_details(&workspace.id)
        .await
        .with_context(|| format!("fetching details of workspace '{}'", workspace.id))?;
    directory.remember(workspace.clone());
    let agent = api.connect(&workspace)?;

    // Step 8: Create project entries.
    let creation = match create_projects(&agent, &workspace.id, &batch).await {
        Ok(()) => CreationStatus::Created { count: batch.len() },
        Err(CreationError::NothingToCreate) => CreationStatus::NothingToCreate,
        Err(e) => {
            reporter.warn(&e.to_string());
            CreationStatus::Failed {
                reason: e.to_string(),
            }
        }
    };

    // Step 9: Import projects.
    let skip_import = matches!(creation, CreationStatus::Failed { .. })
        && opts.on_creation_failure == CreationFailurePolicy::Abort;
    let import = if skip_import {
        warn!(workspace_id = %workspace.id, "project creation failed, skipping import");
        ImportStatus::Skipped
    } else {
        if !batch.is_empty() {
            reporter.step(&format!("importing {} project(s)...", batch.len()));
        }
        let report = import_projects(api, &agent, &workspace.id, &batch).await;
        if let BatchOutcome::Failure(failed) = &report.outcome {
            reporter.warn(&format!("projects failed to import: {failed}"));
        }
        ImportStatus::Completed(report)
    };

    Ok(ProvisionReport {
        workspace,
        ide_path,
        projects: batch.into_iter().map(|t| t.name).collect(),
        creation,
        import,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Wait until `workspace_id` is observed RUNNING, bounded by `limit`.
async fn wait_running(
    api: &impl WorkspaceApi,
    workspace_id: &str,
    limit: Option<Duration>,
) -> Result<()> {
    let watch = api.fetch_status_change(workspace_id, WorkspaceStatus::Running);
    let observed = match limit {
        Some(limit) => tokio::time::timeout(limit, watch).await.map_err(|_| {
            ProvisionError::RunningTimeout {
                workspace_id: workspace_id.to_string(),
                timeout_secs: limit.as_secs(),
            }
        })?,
        None => watch.await,
    };
    observed.with_context(|| format!("waiting for workspace '{workspace_id}' to be running"))
}
