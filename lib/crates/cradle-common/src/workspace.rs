use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Link relation that points at the per-workspace project agent.
pub const WSAGENT_LINK_REL: &str = "wsagent";

/// Lifecycle status of a workspace as reported by the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkspaceStatus {
    Starting,
    Running,
    Stopping,
    Stopped,
    Error,
}

impl WorkspaceStatus {
    /// Wire name of the status, e.g. `"RUNNING"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "STARTING",
            Self::Running => "RUNNING",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is not one of the known wire names.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown workspace status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for WorkspaceStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STARTING" => Ok(Self::Starting),
            "RUNNING" => Ok(Self::Running),
            "STOPPING" => Ok(Self::Stopping),
            "STOPPED" => Ok(Self::Stopped),
            "ERROR" => Ok(Self::Error),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// How an environment's machines are built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A single machine inside an environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Machine {
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// A named runtime environment of a workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Environment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub machines: BTreeMap<String, Machine>,
}

/// Declarative description of a workspace, owned by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    pub name: String,
    pub default_env: String,
    #[serde(default)]
    pub environments: BTreeMap<String, Environment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Hypermedia link attached to workspace resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// Runtime details, present once the workspace has been started.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceRuntime {
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A server-managed workspace.
///
/// `id` is assigned by the server on creation and never changes afterwards.
/// `status` only moves through server-observed transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workspace {
    pub id: String,
    pub namespace: String,
    pub config: WorkspaceConfig,
    pub status: WorkspaceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<WorkspaceRuntime>,
}

impl Workspace {
    /// Base URL of the workspace's project agent, if the runtime exposes one.
    #[must_use]
    pub fn ws_agent_url(&self) -> Option<&str> {
        self.runtime
            .as_ref()?
            .links
            .iter()
            .find(|l| l.rel == WSAGENT_LINK_REL)
            .map(|l| l.href.as_str())
    }
}
