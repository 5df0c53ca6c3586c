use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method},
    routing::{get, on},
    Router,
};
use bytes::Bytes;
use policy_sidecar_types::SidecarConfig;
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::CoreResult;
use crate::proxy::handlers::{handle_forward, handle_healthz};
use crate::proxy::middleware::logging::MAX_REQUEST_BODY_SIZE;
use crate::proxy::middleware::{auth_middleware, request_log_middleware};
use crate::proxy::routes::{Endpoint, HEALTH_PATH};
use crate::proxy::upstream::UpstreamClient;

/// Axum application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SidecarConfig>,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    /// Validate `config` and build the shared backend client.
    pub fn new(config: SidecarConfig) -> CoreResult<Self> {
        let config = config.validated()?;
        let upstream = UpstreamClient::new(&config)?;
        Ok(Self { config: Arc::new(config), upstream: Arc::new(upstream) })
    }
}

/// Build the proxy router.
///
/// Layer order, outermost first: trace, auth gate, request log, body limit.
pub fn build_proxy_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new().route(HEALTH_PATH, get(handle_healthz));

    for endpoint in Endpoint::ALL {
        router = router.route(
            endpoint.path(),
            on(
                endpoint.method_filter(),
                move |State(state): State<AppState>,
                      method: Method,
                      headers: HeaderMap,
                      body: Bytes| async move {
                    handle_forward(state, endpoint, method, headers, body).await
                },
            ),
        );
    }

    router
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
        .layer(axum::middleware::from_fn(request_log_middleware))
        .layer(axum::middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Configuration for starting the Axum server
pub struct ServerStartConfig {
    pub host: String,
    pub port: u16,
    pub config: SidecarConfig,
}

pub struct AxumServer {
    config: ServerStartConfig,
}

impl AxumServer {
    pub fn new(config: ServerStartConfig) -> Self {
        Self { config }
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, shutdown: F) -> CoreResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        if !self.config.config.auth_enabled() {
            tracing::warn!(
                "No API token configured: /v1/* is open to anyone who can reach {}",
                addr
            );
        }

        let state = AppState::new(self.config.config)?;
        tracing::info!(
            overrides = state.config.allow_header_overrides,
            timeout_secs = state.config.request_timeout_secs,
            "Loaded configuration"
        );
        tracing::info!("Forwarding to {}", state.upstream.base_url());
        let app = build_proxy_router(state);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Policy sidecar listening on {}", addr);
        axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
