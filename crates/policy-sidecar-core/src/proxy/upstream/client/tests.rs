use super::*;
use axum::http::HeaderValue;

#[test]
fn test_build_url() {
    assert_eq!(
        build_url("http://litellm:4000", "/v1/chat/completions"),
        "http://litellm:4000/v1/chat/completions"
    );
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let config =
        SidecarConfig { backend_url: "http://litellm:4000/".to_string(), ..Default::default() };
    let client = UpstreamClient::with_client(Client::new(), &config);
    assert_eq!(client.base_url(), "http://litellm:4000");
}

#[test]
fn test_outbound_headers_drop_host_and_framing() {
    let mut inbound = HeaderMap::new();
    inbound.insert(header::HOST, HeaderValue::from_static("sidecar:8000"));
    inbound.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
    inbound.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer secret"));
    inbound.insert("x-model", HeaderValue::from_static("b"));

    let outbound = outbound_headers(&inbound);
    assert!(outbound.get(header::HOST).is_none());
    assert!(outbound.get(header::CONTENT_LENGTH).is_none());
    assert_eq!(outbound.get(header::AUTHORIZATION).unwrap(), "Bearer secret");
    assert_eq!(outbound.get("x-model").unwrap(), "b");
}

#[test]
fn test_response_strips_transport_headers_only() {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
    headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
    headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));

    let upstream = UpstreamResponse {
        status: StatusCode::CREATED,
        headers,
        body: Bytes::from_static(b"{}"),
    };
    let response = upstream.into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");
    assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    assert!(response.headers().get(header::CONNECTION).is_none());
    assert!(response.headers().get(header::TRANSFER_ENCODING).is_none());
    assert_eq!(response.headers().get_all(header::SET_COOKIE).iter().count(), 2);
}

#[tokio::test]
async fn test_unreachable_backend_is_unavailable() {
    let config =
        SidecarConfig { backend_url: "http://127.0.0.1:1".to_string(), ..Default::default() };
    let client = UpstreamClient::new(&config).unwrap();
    let err = client
        .forward(Method::GET, "/v1/models", &HeaderMap::new(), Bytes::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ProxyError::UpstreamUnavailable { .. }));
}
