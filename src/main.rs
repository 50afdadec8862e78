//! request-firewall
//!
//! ```text
//!     Client Request
//!     ──────────────▶ listener ──▶ request id ──▶ trace ──▶ inspector ──┬──▶ 403 Blocked
//!                                                                       └──▶ 200 Allowed
//! ```

use clap::Parser;

use request_firewall::cli::Cli;
use request_firewall::observability::init_logging;
use request_firewall::{FirewallServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    init_logging(&config.logging)?;

    tracing::info!("request-firewall v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        max_body_size = config.limits.max_body_size,
        request_timeout_secs = config.limits.request_timeout_secs,
        "Configuration loaded"
    );

    let server = FirewallServer::new(config);
    let listener = server.bind().await?;

    // Held for the life of the process; OS signals drive shutdown.
    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
