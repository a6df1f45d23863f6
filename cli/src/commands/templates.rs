//! `cradle templates` — list the project template catalog.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use cradle_common::ProjectTemplate;

use crate::app::AppContext;
use crate::application::ports::TemplateSource;
use crate::infra::fs::FileCatalog;

/// Arguments for the templates command.
#[derive(Args)]
pub struct TemplatesArgs {
    /// Read templates from a YAML or JSON file instead of the API
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

/// Run the templates command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn run(app: &AppContext, args: &TemplatesArgs) -> Result<ExitCode> {
    let templates = load_catalog(app, args.catalog.as_deref()).await?;
    app.renderer().render_templates(&templates)?;
    Ok(ExitCode::SUCCESS)
}

/// Load the template catalog from `catalog` or, when absent, from the API.
///
/// # Errors
///
/// Returns an error if the file or the API cannot be read.
pub async fn load_catalog(
    app: &AppContext,
    catalog: Option<&std::path::Path>,
) -> Result<Vec<ProjectTemplate>> {
    match catalog {
        Some(path) => FileCatalog::new(path).templates().await,
        None => app
            .api_client()?
            .templates()
            .await
            .context("cannot load project templates from the API"),
    }
}
