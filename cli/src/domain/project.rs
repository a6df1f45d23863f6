//! Project template selection and type choice.

use anyhow::Result;
use cradle_common::ProjectTemplate;
use serde::{Deserialize, Serialize};

use crate::domain::error::TemplateError;

/// Project type used when nothing else matches.
pub const BLANK_PROJECT_TYPE: &str = "blank";

/// One candidate project type reported by the project agent for a source tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceEstimation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub matched: bool,
}

/// Build the provisioning batch: the available templates whose name was
/// selected, in catalog order.
///
/// # Errors
///
/// Returns [`TemplateError::UnknownTemplate`] if a selected name is not in
/// the catalog.
pub fn select_templates(
    available: &[ProjectTemplate],
    selected: &[String],
) -> Result<Vec<ProjectTemplate>> {
    if let Some(missing) = selected
        .iter()
        .find(|name| !available.iter().any(|t| &t.name == *name))
    {
        return Err(TemplateError::UnknownTemplate {
            name: missing.clone(),
            available: available
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
        .into());
    }
    Ok(filter_selected(available, selected))
}

/// The available templates whose name is in `selected`, in catalog order.
/// Names missing from the catalog are ignored.
#[must_use]
pub fn filter_selected(available: &[ProjectTemplate], selected: &[String]) -> Vec<ProjectTemplate> {
    available
        .iter()
        .filter(|t| selected.contains(&t.name))
        .cloned()
        .collect()
}

/// Pick the project type to apply after importing `template`.
///
/// The first matched estimation wins, then the template's declared type,
/// then [`BLANK_PROJECT_TYPE`].
#[must_use]
pub fn pick_project_type(template: &ProjectTemplate, estimations: &[SourceEstimation]) -> String {
    estimations
        .iter()
        .find(|e| e.matched)
        .map(|e| e.kind.clone())
        .or_else(|| template.project_type.clone())
        .unwrap_or_else(|| BLANK_PROJECT_TYPE.to_string())
}
