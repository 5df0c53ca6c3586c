//! Typed error definitions.
//!
//! - [`ProxyError`] covers everything a request can fail with on its way
//!   through the sidecar.
//! - [`ConfigError`] covers start-up configuration problems.

mod config;
mod proxy;

pub use config::ConfigError;
pub use proxy::ProxyError;
