//! Terminal stylesheet.
//!
//! Every field is a plain `Style` until [`Styles::colorize`] runs, so
//! `--no-color` and non-TTY output render text without escape codes.

use cradle_common::WorkspaceStatus;
use owo_colors::Style;

/// Styles shared by the human renderer, the reporter and `OutputContext`.
#[derive(Debug, Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    /// Ids, paths and other secondary text.
    pub dim: Style,
    pub bold: Style,
    /// Section titles.
    pub header: Style,
}

impl Styles {
    /// Switch every field to its colored variant.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.header = Style::new().bold().cyan();
    }

    /// Style of a workspace status in listings.
    #[must_use]
    pub fn status(&self, status: WorkspaceStatus) -> Style {
        match status {
            WorkspaceStatus::Running => self.success,
            WorkspaceStatus::Starting | WorkspaceStatus::Stopping => self.warning,
            WorkspaceStatus::Error => self.error,
            WorkspaceStatus::Stopped => self.dim,
        }
    }
}
