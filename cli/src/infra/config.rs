//! `ConfigStore` backed by a YAML file.
//!
//! The file location is resolved on every access: an explicit path wins,
//! then `$CRADLE_CONFIG`, then `~/.cradle/config.yaml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::CradleConfig;
use crate::infra::fs::read_yaml;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "CRADLE_CONFIG";

const CONFIG_DIR: &str = ".cradle";
const CONFIG_FILE: &str = "config.yaml";

/// Settings file on disk. A missing file reads as the default settings.
#[derive(Debug, Clone, Default)]
pub struct YamlConfigStore {
    location: Option<PathBuf>,
}

impl YamlConfigStore {
    /// Store at the conventional location, honouring `$CRADLE_CONFIG`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pinned to `path`, ignoring the environment.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Some(path.into()),
        }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<CradleConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(CradleConfig::default());
        }
        read_yaml(&path)
    }

    fn save(&self, config: &CradleConfig) -> Result<()> {
        write_config(&self.path()?, config)
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.location {
            return Ok(path.clone());
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().context("cannot determine home directory")?;
        Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }
}

/// Write `config` to `path`, owner-readable only since it may carry the API
/// token.
fn write_config(path: &Path, config: &CradleConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let content = serde_yaml::to_string(config).context("cannot serialize config")?;
    std::fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("cannot set permissions on {}", path.display()))?;
    }
    Ok(())
}
