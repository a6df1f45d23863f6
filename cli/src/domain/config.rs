//! Domain types and validators for Cradle configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api.url",
    "api.token",
    "provisioning.running_timeout_secs",
    "provisioning.status_poll_interval_secs",
    "provisioning.on_creation_failure",
];
pub const VALID_CREATION_POLICIES: &[&str] = &["proceed", "abort"];

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_RUNNING_TIMEOUT_SECS: u64 = 600;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.cradle/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CradleConfig {
    /// Workspace API connection settings.
    pub api: ApiConfig,
    /// Provisioning pipeline settings.
    pub provisioning: ProvisioningConfig,
}

/// Workspace API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the workspace API, e.g. `http://localhost:8080`.
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            token: None,
        }
    }
}

/// What to do with project import when bulk project creation failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreationFailurePolicy {
    /// Import anyway.
    #[default]
    Proceed,
    /// Skip project import.
    Abort,
}

impl std::fmt::Display for CreationFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Proceed => "proceed",
            Self::Abort => "abort",
        })
    }
}

/// Provisioning pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Seconds to wait for the RUNNING status. `0` waits indefinitely.
    #[serde(default = "default_running_timeout_secs")]
    pub running_timeout_secs: u64,
    /// Seconds between two status polls.
    #[serde(default = "default_poll_interval_secs")]
    pub status_poll_interval_secs: u64,
    /// Behaviour of project import after a failed bulk creation.
    #[serde(default)]
    pub on_creation_failure: CreationFailurePolicy,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            running_timeout_secs: default_running_timeout_secs(),
            status_poll_interval_secs: default_poll_interval_secs(),
            on_creation_failure: CreationFailurePolicy::default(),
        }
    }
}

impl ProvisioningConfig {
    /// RUNNING wait timeout, `None` when waiting indefinitely.
    #[must_use]
    pub fn running_timeout(&self) -> Option<Duration> {
        (self.running_timeout_secs > 0).then(|| Duration::from_secs(self.running_timeout_secs))
    }

    #[must_use]
    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_secs(self.status_poll_interval_secs.max(1))
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_running_timeout_secs() -> u64 {
    DEFAULT_RUNNING_TIMEOUT_SECS
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |valid: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    };
    match key {
        "api.url" if !(value.starts_with("http://") || value.starts_with("https://")) => {
            Err(invalid("an http:// or https:// URL").into())
        }
        "provisioning.running_timeout_secs" if value.parse::<u64>().is_err() => {
            Err(invalid("a number of seconds (0 waits forever)").into())
        }
        "provisioning.status_poll_interval_secs"
            if !value.parse::<u64>().is_ok_and(|secs| secs > 0) =>
        {
            Err(invalid("a positive number of seconds").into())
        }
        "provisioning.on_creation_failure" if !VALID_CREATION_POLICIES.contains(&value) => {
            Err(invalid(&VALID_CREATION_POLICIES.join(", ")).into())
        }
        _ => Ok(()),
    }
}

/// Apply an already validated `key = value` to `config`.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value does not parse.
pub fn apply_config_value(config: &mut CradleConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "api.url" => config.api.url = value.to_string(),
        "api.token" => config.api.token = (!value.is_empty()).then(|| value.to_string()),
        "provisioning.running_timeout_secs" => {
            config.provisioning.running_timeout_secs = value.parse()?;
        }
        "provisioning.status_poll_interval_secs" => {
            config.provisioning.status_poll_interval_secs = value.parse()?;
        }
        "provisioning.on_creation_failure" => {
            config.provisioning.on_creation_failure = if value == "abort" {
                CreationFailurePolicy::Abort
            } else {
                CreationFailurePolicy::Proceed
            };
        }
        _ => anyhow::bail!("Unknown setting: {key}"),
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
