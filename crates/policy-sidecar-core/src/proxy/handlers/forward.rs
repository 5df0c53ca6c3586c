//! Shared forwarding path for every `/v1/*` endpoint.

use axum::{
    http::{header, HeaderMap, Method},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use policy_sidecar_types::SidecarConfig;
use serde_json::Value;

use crate::proxy::common::error_response;
use crate::proxy::policy::merge_policy;
use crate::proxy::routes::Endpoint;
use crate::proxy::server::AppState;

/// Everything one handler invocation owns.
#[derive(Debug)]
pub struct RequestContext {
    pub method: Method,
    pub target_path: &'static str,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// Parsed body, when it is non-empty JSON
    pub json: Option<Value>,
}

impl RequestContext {
    pub fn new(method: Method, target_path: &'static str, headers: HeaderMap, body: Bytes) -> Self {
        let json = if is_json_content(&headers) && !body.is_empty() {
            serde_json::from_slice(&body).ok()
        } else {
            None
        };
        Self { method, target_path, headers, body, json }
    }
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

/// Body to send to the backend.
///
/// Only a chat-completions body that parsed as a JSON object is merged and
/// re-serialized; everything else goes out byte-for-byte.
pub fn prepare_outbound_body(
    ctx: &mut RequestContext,
    endpoint: Endpoint,
    config: &SidecarConfig,
) -> Bytes {
    if !endpoint.applies_policy() {
        return ctx.body.clone();
    }
    match ctx.json.take() {
        Some(body @ Value::Object(_)) => {
            let merged = merge_policy(body, &ctx.headers, config);
            match serde_json::to_vec(&merged) {
                Ok(bytes) => Bytes::from(bytes),
                Err(e) => {
                    tracing::warn!("Failed to serialize merged body, forwarding original: {}", e);
                    ctx.body.clone()
                },
            }
        },
        _ => ctx.body.clone(),
    }
}

pub async fn handle_forward(
    state: AppState,
    endpoint: Endpoint,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut ctx = RequestContext::new(method, endpoint.target_path(), headers, body);
    let outbound = prepare_outbound_body(&mut ctx, endpoint, &state.config);

    match state.upstream.forward(ctx.method, ctx.target_path, &ctx.headers, outbound).await {
        Ok(upstream) => upstream.into_response(),
        Err(err) => error_response(&err),
    }
}
