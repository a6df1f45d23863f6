//! Workspace domain helpers.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

use cradle_common::{Workspace, WorkspaceStatus};

/// Path the IDE is served under for `workspace` in `namespace`.
#[must_use]
pub fn ide_path(namespace: &str, workspace: &Workspace) -> String {
    format!("/ide/{namespace}/{}", workspace.config.name)
}

/// Keep only the workspaces that belong to `namespace`, in input order.
#[must_use]
pub fn in_namespace(workspaces: Vec<Workspace>, namespace: &str) -> Vec<Workspace> {
    workspaces
        .into_iter()
        .filter(|w| w.namespace == namespace)
        .collect()
}

/// Keep only the workspaces currently in `status`, in input order.
#[must_use]
pub fn with_status(workspaces: Vec<Workspace>, status: WorkspaceStatus) -> Vec<Workspace> {
    workspaces
        .into_iter()
        .filter(|w| w.status == status)
        .collect()
}
