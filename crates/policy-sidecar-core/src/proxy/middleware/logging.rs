// Request/response logging with redacted body previews.
// Fails the request only when the body cannot be buffered: 413 past
// MAX_REQUEST_BODY_SIZE, 400 when the upload breaks off.

use axum::{
    body::{Body, HttpBody},
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use policy_sidecar_types::ProxyError;
use std::time::Instant;
use tracing::Instrument;

use crate::proxy::common::error_response;
use crate::proxy::redact::redact;

/// Bytes of the request body that make it into the log line.
pub const BODY_PREVIEW_LIMIT: usize = 1000;
pub const MAX_REQUEST_BODY_SIZE: usize = 100 * 1024 * 1024;

pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    log_request(request, next).instrument(span).await
}

async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let (parts, body) = request.into_parts();

    let bytes = match read_body(body, MAX_REQUEST_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!("Failed to read request body: {}", err);
            return error_response(&err);
        },
    };

    tracing::info!(body = %body_preview(&bytes), "Incoming request");

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    tracing::info!(
        status = response.status().as_u16(),
        streaming = is_streaming(&response),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Response"
    );
    response
}

/// Buffer `body`, allowing at most `limit` bytes.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ProxyError::PayloadTooLarge { limit_bytes: limit })
        },
        Err(e) => Err(ProxyError::BodyRead { message: e.to_string() }),
    }
}

/// Redacted preview of at most [`BODY_PREVIEW_LIMIT`] bytes.
///
/// A multi-byte character cut at the limit is dropped; any other invalid
/// UTF-8 yields an empty preview.
pub fn body_preview(bytes: &[u8]) -> String {
    let head = &bytes[..bytes.len().min(BODY_PREVIEW_LIMIT)];
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(e) if e.error_len().is_none() => {
            std::str::from_utf8(&head[..e.valid_up_to()]).unwrap_or_default()
        },
        Err(_) => "",
    };
    redact(text)
}

/// Bodies without a known length, or event streams, are delivered incrementally.
fn is_streaming(response: &Response) -> bool {
    let event_stream = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("text/event-stream"));
    event_stream || response.body().size_hint().exact().is_none()
}
