//! Static endpoint table.
//!
//! Every `/v1/*` endpoint forwards to the same path on the backend; only the
//! chat-completions endpoint gets the policy merge.

use axum::routing::MethodFilter;

pub const HEALTH_PATH: &str = "/healthz";
/// Requests under this prefix go through the auth gate.
pub const PROTECTED_PREFIX: &str = "/v1/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ChatCompletions,
    Embeddings,
    ImageGenerations,
    Models,
}

impl Endpoint {
    pub const ALL: [Self; 4] =
        [Self::ChatCompletions, Self::Embeddings, Self::ImageGenerations, Self::Models];

    pub fn path(&self) -> &'static str {
        match self {
            Self::ChatCompletions => "/v1/chat/completions",
            Self::Embeddings => "/v1/embeddings",
            Self::ImageGenerations => "/v1/images/generations",
            Self::Models => "/v1/models",
        }
    }

    pub fn method_filter(&self) -> MethodFilter {
        match self {
            Self::Models => MethodFilter::GET,
            _ => MethodFilter::POST,
        }
    }

    pub fn applies_policy(&self) -> bool {
        matches!(self, Self::ChatCompletions)
    }

    /// Backend path, identical to the inbound path.
    pub fn target_path(&self) -> &'static str {
        self.path()
    }
}

pub fn is_protected(path: &str) -> bool {
    path.starts_with(PROTECTED_PREFIX)
}
