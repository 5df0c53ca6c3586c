// Upstream module - backend gateway client

pub mod client;

pub use client::{UpstreamClient, UpstreamResponse};
