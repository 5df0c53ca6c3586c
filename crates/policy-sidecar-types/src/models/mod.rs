//! Domain models for the policy sidecar.

mod config;
mod policy;

pub use config::{PolicyDefaults, SidecarConfig, WebSearchMode};
pub use policy::{PolicyField, PolicyParameters, Setting, VENICE_PARAMETERS_KEY};
