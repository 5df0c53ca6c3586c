// Proxy module - policy-enforcing reverse proxy

pub mod common;
pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod redact;
pub mod routes;
pub mod server;
pub mod upstream;


pub use policy::merge_policy;
pub use routes::Endpoint;
pub use server::{build_proxy_router, AppState, AxumServer, ServerStartConfig};
pub use upstream::UpstreamClient;
