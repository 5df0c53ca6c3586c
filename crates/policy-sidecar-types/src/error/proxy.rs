//! Proxy-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while handling a proxied request.
///
/// `Display` is for server-side logs. Clients only ever see
/// [`ProxyError::client_message`].
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ProxyError {
    /// Missing or invalid bearer credential on a protected path
    #[error("Unauthorized")]
    Unauthorized,

    /// Backend gateway could not be reached or the exchange broke midway
    #[error("Backend unavailable: {message}")]
    UpstreamUnavailable { message: String },

    /// Backend gateway did not answer within the configured ceiling
    #[error("Backend timeout after {duration_secs}s")]
    UpstreamTimeout { duration_secs: u64 },

    /// Inbound body exceeds the buffering limit
    #[error("Request body exceeds {limit_bytes} bytes")]
    PayloadTooLarge { limit_bytes: usize },

    /// Inbound body broke off or failed to decode while buffering
    #[error("Failed to read request body: {message}")]
    BodyRead { message: String },
}

impl ProxyError {
    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::UpstreamUnavailable { .. } => 502,
            Self::UpstreamTimeout { .. } => 504,
            Self::PayloadTooLarge { .. } => 413,
            Self::BodyRead { .. } => 400,
        }
    }

    /// Generic message that is safe to return to the caller.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized",
            Self::UpstreamUnavailable { .. } => "Backend unavailable",
            Self::UpstreamTimeout { .. } => "Backend timeout",
            Self::PayloadTooLarge { .. } => "Request body too large",
            Self::BodyRead { .. } => "Invalid request body",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(ProxyError::Unauthorized.http_status_code(), 401);
        assert_eq!(
            ProxyError::UpstreamUnavailable { message: "refused".to_string() }.http_status_code(),
            502
        );
        assert_eq!(ProxyError::UpstreamTimeout { duration_secs: 120 }.http_status_code(), 504);
        assert_eq!(ProxyError::PayloadTooLarge { limit_bytes: 10 }.http_status_code(), 413);
        assert_eq!(
            ProxyError::BodyRead { message: "reset".to_string() }.http_status_code(),
            400
        );
    }

    #[test]
    fn test_client_message_hides_details() {
        let err = ProxyError::UpstreamUnavailable {
            message: "error sending request for url (http://litellm:4000/v1/models)".to_string(),
        };
        assert_eq!(err.client_message(), "Backend unavailable");
        assert!(err.to_string().contains("litellm"));
    }
}
