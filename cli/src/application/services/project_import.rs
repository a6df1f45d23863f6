//! Application service — import a batch of projects into a running workspace.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use cradle_common::ProjectTemplate;
use serde::Serialize;
use tracing::{error, info};

use crate::application::ports::{ProjectTypeResolver, WorkspaceApi};
use crate::application::services::command_import::add_commands;
use crate::domain::{BatchOutcome, BatchSummary, FailureList};

/// Commands of one project that could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandFailures {
    pub project: String,
    pub commands: FailureList,
}

/// Result of [`import_projects`].
///
/// `outcome` lists the projects whose type resolution failed. Command
/// failures never count as project failures; they are only reported in
/// `command_failures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectImportReport {
    pub outcome: BatchOutcome,
    pub command_failures: Vec<CommandFailures>,
}

/// Import `templates` one project at a time, in input order.
///
/// For every project the commands are added first, then its type is
/// resolved. The next project only starts once both steps have finished.
pub async fn import_projects(
    api: &impl WorkspaceApi,
    resolver: &impl ProjectTypeResolver,
    workspace_id: &str,
    templates: &[ProjectTemplate],
) -> ProjectImportReport {
    let mut summary = BatchSummary::default();
    let mut command_failures = Vec::new();

    for template in templates {
        if let BatchOutcome::Failure(commands) =
            add_commands(api, workspace_id, &template.name, &template.commands).await
        {
            command_failures.push(CommandFailures {
                project: template.name.clone(),
                commands,
            });
        }

        let result = resolver.resolve_type(template).await;
        match &result {
            Ok(()) => info!(project = %template.name, workspace_id, "project imported"),
            Err(e) => error!(
                project = %template.name,
                workspace_id,
                error = %e,
                "importing project failed",
            ),
        }
        summary.record(&template.name, &result);
    }

    ProjectImportReport {
        outcome: summary.into_outcome(),
        command_failures,
    }
}
