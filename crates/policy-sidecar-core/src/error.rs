//! Start-up errors for the proxy core.
//!
//! Per-request failures use [`policy_sidecar_types::ProxyError`] instead.

use policy_sidecar_types::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Process configuration rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Outbound HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Listener bind or serve failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
