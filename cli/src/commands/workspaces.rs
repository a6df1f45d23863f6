//! `cradle workspaces` — list workspaces of a namespace or owned by the user.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use cradle_common::{ParseStatusError, WorkspaceStatus};

use crate::app::AppContext;
use crate::application::services::workspace_directory::WorkspaceDirectory;
use crate::domain::with_status;

/// Arguments for the workspaces command.
#[derive(Args)]
pub struct WorkspacesArgs {
    #[command(flatten)]
    pub scope: ListingScope,

    /// Only list workspaces in this status (running, stopped, ...)
    #[arg(long, value_name = "STATUS", value_parser = parse_status)]
    pub status: Option<WorkspaceStatus>,
}

/// Which listing to read. Exactly one is required.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ListingScope {
    /// List the workspaces of this namespace
    #[arg(long, short)]
    pub namespace: Option<String>,

    /// List the workspaces owned by the current user
    #[arg(long)]
    pub owned: bool,
}

fn parse_status(value: &str) -> Result<WorkspaceStatus, ParseStatusError> {
    value.to_ascii_uppercase().parse()
}

/// Run the workspaces command.
///
/// # Errors
///
/// Returns an error if the listing cannot be obtained.
pub async fn run(app: &AppContext, args: &WorkspacesArgs) -> Result<ExitCode> {
    let api = app.api_client()?;
    let mut directory = WorkspaceDirectory::new();
    let (mut scope, mut workspaces) = match &args.scope.namespace {
        Some(ns) => (
            format!("namespace '{ns}'"),
            directory.list_by_namespace(&api, ns).await?,
        ),
        None => (
            "your account".to_string(),
            directory.get_or_fetch_owned(&api).await?,
        ),
    };
    if let Some(status) = args.status {
        workspaces = with_status(workspaces, status);
        scope = format!("{scope} with status {status}");
    }
    app.renderer().render_workspaces(&scope, &workspaces)?;
    Ok(ExitCode::SUCCESS)
}
