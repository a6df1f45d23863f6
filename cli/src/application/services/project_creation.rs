//! Application service — bulk-create project entries before import.

use cradle_common::ProjectTemplate;
use tracing::info;

use crate::application::ports::ProjectAgent;
use crate::domain::CreationError;

/// Create all `templates` in the workspace's project tree with one request.
///
/// # Errors
///
/// Returns [`CreationError::NothingToCreate`] for an empty batch, without
/// calling the agent, and [`CreationError::Request`] if the bulk request
/// fails. The request is all-or-nothing.
pub async fn create_projects(
    agent: &impl ProjectAgent,
    workspace_id: &str,
    templates: &[ProjectTemplate],
) -> Result<(), CreationError> {
    if templates.is_empty() {
        return Err(CreationError::NothingToCreate);
    }

    agent
        .create_projects(templates)
        .await
        .map_err(|e| CreationError::Request {
            workspace_id: workspace_id.to_string(),
            reason: format!("{e:#}"),
        })?;
    info!(workspace_id, count = templates.len(), "projects created");
    Ok(())
}
