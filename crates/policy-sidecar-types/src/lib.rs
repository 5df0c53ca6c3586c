//! # Policy Sidecar Types
//!
//! Configuration, policy, and error definitions for the policy sidecar.
//!
//! - **`error`** - Typed errors for proxying and configuration
//! - **`models`** - `SidecarConfig` and the per-request `PolicyParameters`
//!
//! ## Architecture Role
//!
//! ```text
//!   policy-sidecar-types (this crate)
//!              │
//!              ▼
//!   policy-sidecar-core (axum proxy)
//!              │
//!              ▼
//!   policy-sidecar-server (binary)
//! ```
//!
//! Nothing here depends on an HTTP framework; the core crate maps errors to
//! responses.

pub mod error;
pub mod models;

pub use error::{ConfigError, ProxyError};
pub use models::{
    PolicyDefaults, PolicyField, PolicyParameters, Setting, SidecarConfig, WebSearchMode,
};
