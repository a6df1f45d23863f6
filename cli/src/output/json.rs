//! JSON renderer.
//!
//! Every `--json` code path prints exactly one pretty-printed JSON document
//! to stdout. Failures use the error object built by [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use cradle_common::{ProjectTemplate, Workspace};
use serde::Serialize;

use crate::application::services::provision::ProvisionReport;
use crate::domain::CradleConfig;

/// Renders domain types as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render a provisioning report, with a top-level `clean` flag.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_report(report: &ProvisionReport) -> Result<()> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            clean: bool,
            #[serde(flatten)]
            report: &'a ProvisionReport,
        }
        print_json(&Envelope {
            clean: report.is_clean(),
            report,
        })
    }

    /// Render a workspace listing.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_workspaces(workspaces: &[Workspace]) -> Result<()> {
        print_json(&serde_json::json!({ "workspaces": workspaces }))
    }

    /// Render a template catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_templates(templates: &[ProjectTemplate]) -> Result<()> {
        print_json(&serde_json::json!({ "templates": templates }))
    }

    /// Render the configuration. The API token is masked.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(config: &CradleConfig, path: &Path) -> Result<()> {
        let mut config = config.clone();
        if config.api.token.is_some() {
            config.api.token = Some(MASKED.to_string());
        }
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        print_json(&serde_json::json!({ "version": version }))
    }
}

/// Placeholder printed instead of a configured API token.
pub const MASKED: &str = "********";

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{out}");
    Ok(())
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
