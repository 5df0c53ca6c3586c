use std::time::Duration;

/// Build the outbound HTTP client with a hard per-call timeout.
///
/// The timeout covers the whole exchange, body included.
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(Duration::from_secs(timeout_secs)).tcp_nodelay(true).build()
}
