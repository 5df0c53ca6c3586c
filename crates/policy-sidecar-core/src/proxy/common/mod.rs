// Common helpers shared by handlers and middleware

pub mod client_builder;
pub mod error_response;

pub use error_response::error_response;
