// Middleware module - Axum middleware

pub mod auth;
pub mod logging;

pub use auth::auth_middleware;
pub use logging::request_log_middleware;
