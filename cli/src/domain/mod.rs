//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod outcome;
pub mod project;
pub mod workspace;

#[allow(unused_imports)]
pub use config::{
    ApiConfig, CradleConfig, CreationFailurePolicy, ProvisioningConfig, apply_config_value,
    validate_config_key, validate_config_value,
};
#[allow(unused_imports)]
pub use error::{ConfigError, CreationError, DirectoryError, ProvisionError, TemplateError};
#[allow(unused_imports)]
pub use outcome::{BatchOutcome, BatchSummary, FailureList};
#[allow(unused_imports)]
pub use project::{SourceEstimation, filter_selected, pick_project_type, select_templates};
#[allow(unused_imports)]
pub use workspace::{ide_path, in_namespace, with_status};
