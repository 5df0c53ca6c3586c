#[cfg(test)]
mod tests;

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use policy_sidecar_types::{ProxyError, SidecarConfig};
use reqwest::Client;

use crate::error::CoreResult;
use crate::proxy::common::client_builder::build_http_client;

/// Inbound headers that never reach the backend.
const STRIPPED_REQUEST_HEADERS: [HeaderName; 3] =
    [header::HOST, header::CONTENT_LENGTH, header::TRANSFER_ENCODING];

/// Backend headers that describe the backend connection, not the payload.
pub const STRIPPED_RESPONSE_HEADERS: [HeaderName; 3] =
    [header::CONTENT_ENCODING, header::TRANSFER_ENCODING, header::CONNECTION];

pub fn build_url(base_url: &str, target_path: &str) -> String {
    format!("{}{}", base_url, target_path)
}

/// Copy `headers` without the entries listed in `stripped`, keeping repeats.
fn filter_headers(headers: &HeaderMap, stripped: &[HeaderName]) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !stripped.contains(name) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}

pub fn outbound_headers(inbound: &HeaderMap) -> HeaderMap {
    filter_headers(inbound, &STRIPPED_REQUEST_HEADERS)
}

/// Fully buffered backend response.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = filter_headers(&self.headers, &STRIPPED_RESPONSE_HEADERS);
        response
    }
}

/// Pooled client for the backend gateway. One per process.
pub struct UpstreamClient {
    http_client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl UpstreamClient {
    pub fn new(config: &SidecarConfig) -> CoreResult<Self> {
        let http_client = build_http_client(config.request_timeout_secs)?;
        Ok(Self::with_client(http_client, config))
    }

    /// Use a pre-built `reqwest::Client`.
    pub fn with_client(http_client: Client, config: &SidecarConfig) -> Self {
        Self {
            http_client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request to `base_url + target_path` and buffer the reply.
    ///
    /// An empty body is not attached. Any backend status is a success here;
    /// only transport failures become errors.
    pub async fn forward(
        &self,
        method: Method,
        target_path: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<UpstreamResponse, ProxyError> {
        let url = build_url(&self.base_url, target_path);
        let mut request = self.http_client.request(method, &url).headers(outbound_headers(headers));
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| self.map_error(&url, e))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| self.map_error(&url, e))?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Backend responded");
        Ok(UpstreamResponse { status, headers, body })
    }

    fn map_error(&self, url: &str, err: reqwest::Error) -> ProxyError {
        if err.is_timeout() {
            tracing::warn!("Backend call to {} timed out after {}s", url, self.timeout_secs);
            ProxyError::UpstreamTimeout { duration_secs: self.timeout_secs }
        } else {
            tracing::warn!("Backend call to {} failed: {}", url, err);
            ProxyError::UpstreamUnavailable { message: err.to_string() }
        }
    }
}
