//! Application service — register a project's commands in a workspace.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use cradle_common::Command;
use tracing::{debug, warn};

use crate::application::ports::WorkspaceApi;
use crate::domain::{BatchOutcome, BatchSummary};

/// Add `commands` of `project_name` to the workspace, one at a time.
///
/// Each command is registered as `"<project_name>:<name>"`. Commands are sent
/// strictly in list order and the next one is only sent once the previous
/// call has finished. A failed command does not stop the batch; its scoped
/// name is recorded and returned in [`BatchOutcome::Failure`].
pub async fn add_commands(
    api: &impl WorkspaceApi,
    workspace_id: &str,
    project_name: &str,
    commands: &[Command],
) -> BatchOutcome {
    if commands.is_empty() {
        return BatchOutcome::Success;
    }

    let mut summary = BatchSummary::default();
    for command in commands {
        let scoped = command.scoped_to(project_name);
        let result = api.add_command(workspace_id, &scoped).await;
        match &result {
            Ok(()) => debug!(command = %scoped.name, workspace_id, "command added"),
            Err(e) => warn!(
                command = %scoped.name,
                project = project_name,
                workspace_id,
                error = %e,
                "adding command failed",
            ),
        }
        summary.record(&scoped.name, &result);
    }
    summary.into_outcome()
}
