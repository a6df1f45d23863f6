use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named, typed executable action scoped to one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub command_line: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Command {
    /// Returns a copy of this command named `"<project>:<name>"`.
    ///
    /// Command names must be unique across a workspace, so every command is
    /// prefixed with the project it belongs to before it is registered.
    #[must_use]
    pub fn scoped_to(&self, project: &str) -> Self {
        Self {
            name: format!("{project}:{}", self.name),
            ..self.clone()
        }
    }
}

/// Where a project's sources come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectSource {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

/// A reusable project blueprint that can be imported into a workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplate {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub source: ProjectSource,
    #[serde(default)]
    pub commands: Vec<Command>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ProjectTemplate {
    /// Build an empty project with only a name and a description.
    ///
    /// The path is derived from the name: `/` followed by the name with every
    /// character outside `[A-Za-z0-9_-]` replaced by `_`.
    #[must_use]
    pub fn blank(name: &str, description: &str) -> Self {
        let sanitized: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            description: description.to_string(),
            path: format!("/{sanitized}"),
            ..Self::default()
        }
    }
}
