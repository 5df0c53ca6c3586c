//! Client-facing error responses.
//!
//! The body only carries the generic message for the error kind; details go
//! to the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use policy_sidecar_types::ProxyError;

pub fn error_response(err: &ProxyError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "detail": err.client_message() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = error_response(&ProxyError::Unauthorized);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_timeout_maps_to_504() {
        let response = error_response(&ProxyError::UpstreamTimeout { duration_secs: 120 });
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_oversized_body_maps_to_413() {
        let response = error_response(&ProxyError::PayloadTooLarge { limit_bytes: 100 });
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"detail": "Request body too large"}));
    }

    #[tokio::test]
    async fn test_body_does_not_echo_details() {
        let response = error_response(&ProxyError::UpstreamUnavailable {
            message: "dns error: litellm".to_string(),
        });
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"detail": "Backend unavailable"}));
    }
}
