//! `cradle provision` — create a workspace and import projects into it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use cradle_common::ProjectTemplate;

use crate::app::AppContext;
use crate::application::ports::CreateOptions;
use crate::application::services::provision::{ProvisionOptions, ProvisionRequest, provision};
use crate::application::services::workspace_directory::WorkspaceDirectory;
use crate::commands::templates::load_catalog;
use crate::domain::select_templates;
use crate::infra::fs::read_workspace_config;
use crate::output::{TerminalNavigator, TerminalReporter};

/// Exit code of a run that finished with recorded failures.
pub const EXIT_RECORDED_FAILURES: u8 = 3;

/// Arguments for the provision command.
#[derive(Args)]
pub struct ProvisionArgs {
    /// Namespace to create the workspace in
    #[arg(long, short)]
    pub namespace: String,

    /// Workspace configuration file (YAML or JSON)
    #[arg(long, short, value_name = "FILE")]
    pub config: PathBuf,

    /// Template to import (repeatable)
    #[arg(long = "template", short, value_name = "NAME")]
    pub templates: Vec<String>,

    /// Read templates from a YAML or JSON file instead of the API
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Also create an empty project with this name
    #[arg(long, value_name = "NAME")]
    pub blank: Option<String>,

    /// Description of the blank project
    #[arg(long, requires = "blank", default_value = "")]
    pub blank_description: String,

    /// Workspace attribute sent on creation (repeatable)
    #[arg(long = "attribute", value_name = "KEY=VALUE", value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// Run the provision command.
///
/// Returns exit code 3 when provisioning finished but recorded failures.
///
/// # Errors
///
/// Returns an error if the inputs are invalid or the pipeline hard-stops.
pub async fn run(app: &AppContext, args: ProvisionArgs) -> Result<ExitCode> {
    let workspace_config = read_workspace_config(&args.config)?;
    let config = app.config()?;

    let mut available = if args.templates.is_empty() {
        Vec::new()
    } else {
        load_catalog(app, args.catalog.as_deref()).await?
    };
    let mut selected = args.templates;
    select_templates(&available, &selected)?;

    if let Some(name) = args.blank.as_deref() {
        anyhow::ensure!(
            !available.iter().any(|t| t.name == name),
            "Blank project '{name}' clashes with a catalog template of the same name"
        );
        available.push(ProjectTemplate::blank(name, &args.blank_description));
        selected.push(name.to_string());
    }

    let api = app.api_client()?;
    let mut directory = WorkspaceDirectory::new();
    let navigator = TerminalNavigator::new(&app.output, &config.api.url);
    let reporter = TerminalReporter::new(&app.output);

    let request = ProvisionRequest {
        namespace: &args.namespace,
        config: &workspace_config,
        selected: &selected,
        available: &available,
        create_options: CreateOptions {
            attributes: args.attributes.into_iter().collect(),
        },
    };
    let opts = ProvisionOptions {
        running_timeout: config.provisioning.running_timeout(),
        on_creation_failure: config.provisioning.on_creation_failure,
    };
    let report = provision(&api, &mut directory, &navigator, &reporter, request, opts).await?;
    drop(reporter);

    app.renderer().render_report(&report)?;
    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_RECORDED_FAILURES))
    }
}
