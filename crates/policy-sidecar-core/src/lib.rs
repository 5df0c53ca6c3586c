//! # Policy Sidecar Core
//!
//! Reverse proxy that sits in front of an LLM inference gateway.
//!
//! ```text
//! policy-sidecar-core/src/proxy/
//! ├── routes.rs         # static endpoint table
//! ├── middleware/       # auth gate, redacting request logger
//! ├── handlers/         # forwarding + health handlers
//! ├── policy.rs         # venice_parameters merge
//! ├── redact.rs         # log redaction rules
//! ├── upstream/         # backend gateway client
//! └── server.rs         # router assembly + listener
//! ```
//!
//! Per request: auth gate (`/v1/*` only) → request log → body parse →
//! policy merge (chat completions only) → forward → response log.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod error;
pub mod proxy;

pub use error::{CoreError, CoreResult};
pub use proxy::server::{build_proxy_router, AppState, AxumServer, ServerStartConfig};
