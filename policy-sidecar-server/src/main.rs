//! Policy Sidecar - Headless Daemon
//!
//! Sits in front of the LLM gateway on `/v1/*`:
//! - Checks the bearer token (when one is configured)
//! - Logs a redacted preview of every request body
//! - Merges `venice_parameters` into chat completions
//!
//! Liveness probe on `/healthz`.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod server_utils;

use cli::Cli;
use policy_sidecar_core::{AxumServer, ServerStartConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let host = cli.host.clone();
    let port = cli.port;
    let config = cli.into_config();

    info!("Policy sidecar v{} starting", env!("CARGO_PKG_VERSION"));

    let server = AxumServer::new(ServerStartConfig { host, port, config });
    server.run(server_utils::shutdown_signal()).await?;

    info!("Policy sidecar stopped");
    Ok(())
}
