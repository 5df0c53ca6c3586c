// Handlers module - forwarding and health endpoints

pub mod forward;
pub mod health;

pub use forward::{handle_forward, prepare_outbound_body, RequestContext};
pub use health::handle_healthz;
