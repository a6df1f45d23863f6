//! Command handlers, one module per `cradle` subcommand.

pub mod config;
pub mod provision;
pub mod templates;
pub mod version;
pub mod workspaces;

pub use provision::ProvisionArgs;
pub use templates::TemplatesArgs;
pub use workspaces::WorkspacesArgs;
