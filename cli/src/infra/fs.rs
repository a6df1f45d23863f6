//! Filesystem infrastructure — template catalog files and workspace configs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cradle_common::{ProjectTemplate, WorkspaceConfig};
use serde::de::DeserializeOwned;

use crate::application::ports::TemplateSource;

/// Template catalog stored in a local YAML or JSON file.
///
/// The file holds a list of templates in catalog order.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateSource for FileCatalog {
    async fn templates(&self) -> Result<Vec<ProjectTemplate>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_yaml(&path))
            .await
            .context("spawn_blocking for template catalog")?
    }
}

/// Read a workspace configuration from a YAML or JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a
/// workspace configuration.
pub fn read_workspace_config(path: &Path) -> Result<WorkspaceConfig> {
    let config: WorkspaceConfig = read_yaml(path)?;
    anyhow::ensure!(
        !config.name.trim().is_empty(),
        "{}: workspace name is empty",
        path.display()
    );
    anyhow::ensure!(
        !config.default_env.trim().is_empty(),
        "{}: defaultEnv is empty",
        path.display()
    );
    Ok(config)
}

/// JSON documents are valid YAML, so one parser covers both formats.
pub(crate) fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}
