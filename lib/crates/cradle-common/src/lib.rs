pub mod project;
pub mod workspace;

pub use project::{Command, ProjectSource, ProjectTemplate};
pub use workspace::{
    Environment, Link, Machine, ParseStatusError, Recipe, Workspace, WorkspaceConfig,
    WorkspaceRuntime, WorkspaceStatus, WSAGENT_LINK_REL,
};
