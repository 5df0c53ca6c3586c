use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use policy_sidecar_types::ProxyError;
use subtle::ConstantTimeEq;

use crate::proxy::common::error_response;
use crate::proxy::routes::is_protected;
use crate::proxy::server::AppState;

const BEARER_PREFIX: &str = "bearer ";

/// Bearer-token gate for `/v1/*`. Everything else passes straight through.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !is_protected(path) {
        return next.run(request).await;
    }

    let auth_header = request.headers().get(header::AUTHORIZATION).and_then(|h| h.to_str().ok());

    match authorize(&state.config.api_token, auth_header) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::warn!(method = %request.method(), path = %path, "Rejected request: {}", err);
            error_response(&err)
        },
    }
}

/// Check an `Authorization` header value against the configured token.
///
/// An empty token disables the check.
pub fn authorize(token: &str, auth_header: Option<&str>) -> Result<(), ProxyError> {
    if token.is_empty() {
        return Ok(());
    }

    let presented = auth_header.and_then(strip_bearer);
    match presented {
        Some(candidate) if constant_time_compare(candidate, token) => Ok(()),
        _ => Err(ProxyError::Unauthorized),
    }
}

/// Remainder after a case-insensitive `Bearer ` prefix, untrimmed.
fn strip_bearer(value: &str) -> Option<&str> {
    let prefix = value.get(..BEARER_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        value.get(BEARER_PREFIX.len()..)
    } else {
        None
    }
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
