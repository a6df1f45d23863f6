//! Human-readable terminal renderer.

use std::path::Path;

use cradle_common::{ProjectTemplate, Workspace};
use owo_colors::OwoColorize as _;

use crate::application::services::provision::{CreationStatus, ImportStatus, ProvisionReport};
use crate::domain::{BatchOutcome, CradleConfig};
use crate::output::OutputContext;
use crate::output::json::MASKED;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("cradle {version}");
    }

    /// Render the outcome of a provisioning run.
    ///
    /// Failures are shown even in quiet mode.
    pub fn render_report(&self, report: &ProvisionReport) {
        let ws = &report.workspace;
        if !self.ctx.quiet {
            println!();
            self.ctx.kv("Workspace:", &format!("{} ({})", ws.config.name, ws.id));
            self.ctx.kv("Namespace:", &ws.namespace);
            self.ctx.kv("Status:", ws.status.as_str());
            self.ctx.kv("IDE:", &report.ide_path);
            let elapsed = report.finished_at - report.started_at;
            self.ctx
                .kv("Elapsed:", &format!("{}s", elapsed.num_seconds().max(0)));
            println!();
        }

        match &report.creation {
            CreationStatus::Created { count } => {
                self.ctx.success(&format!("{count} project(s) created"));
            }
            CreationStatus::NothingToCreate => self.ctx.info("No projects selected"),
            CreationStatus::Failed { reason } => self.ctx.error(reason),
        }

        match &report.import {
            ImportStatus::Skipped => self.ctx.error("Project import skipped"),
            ImportStatus::Completed(import) => {
                for failure in &import.command_failures {
                    self.ctx.error(&format!(
                        "Commands of '{}' failed to import: {}",
                        failure.project, failure.commands
                    ));
                }
                match &import.outcome {
                    BatchOutcome::Success if !report.projects.is_empty() => {
                        self.ctx.success(&format!(
                            "Imported {}",
                            report.projects.join(", ").style(self.ctx.styles.bold)
                        ));
                    }
                    BatchOutcome::Success => {}
                    BatchOutcome::Failure(failed) => {
                        self.ctx.error(&format!("Projects failed to import: {failed}"));
                    }
                }
            }
        }
    }

    /// Render a workspace listing as a table.
    pub fn render_workspaces(&self, scope: &str, workspaces: &[Workspace]) {
        if workspaces.is_empty() {
            if !self.ctx.quiet {
                println!("No workspaces in {scope}.");
            }
            return;
        }

        println!("Workspaces in {scope}:\n");
        for ws in workspaces {
            println!(
                "  {:<24} {:<10} {}",
                ws.config.name,
                ws.status.as_str().style(self.ctx.styles.status(ws.status)),
                ws.id.style(self.ctx.styles.dim)
            );
        }
    }

    /// Render a template catalog.
    pub fn render_templates(&self, templates: &[ProjectTemplate]) {
        if templates.is_empty() {
            if !self.ctx.quiet {
                println!("No project templates available.");
            }
            return;
        }

        println!("Available templates:\n");
        for t in templates {
            let label = if t.display_name.is_empty() {
                t.name.as_str()
            } else {
                t.display_name.as_str()
            };
            println!("  {:<20} {:<12} {label}", t.name, t.category);
        }
        println!("\nProvision with: cradle provision --template <name>");
    }

    /// Render the current cradle configuration.
    pub fn render_config(&self, config: &CradleConfig, path: &Path) {
        let token = if config.api.token.is_some() {
            MASKED
        } else {
            "(not set)"
        };
        let timeout = match config.provisioning.running_timeout_secs {
            0 => "unbounded".to_string(),
            secs => format!("{secs}s"),
        };
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<40} {}", "api.url:", config.api.url);
        println!("  {:<40} {token}", "api.token:");
        println!("  {:<40} {timeout}", "provisioning.running_timeout_secs:");
        println!(
            "  {:<40} {}s",
            "provisioning.status_poll_interval_secs:", config.provisioning.status_poll_interval_secs
        );
        println!(
            "  {:<40} {}",
            "provisioning.on_creation_failure:", config.provisioning.on_creation_failure
        );
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["CRADLE_CONFIG", "CRADLE_API_URL", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}
