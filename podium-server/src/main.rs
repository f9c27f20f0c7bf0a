//! Podium Server CLI
//!
//! Run with: `cargo run -p podium-server -- --help`

use clap::Parser;
use podium_server::{init_logging, PodiumServer, ServerConfig, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI + env via clap
    let config = ServerConfig::parse();

    // Initialize telemetry
    let telemetry_config = TelemetryConfig::with_server_config(&config);
    init_logging(&telemetry_config);

    // Log startup info
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.listen_addr,
        data_path = %config.data_path.display(),
        cors = config.cors_enabled,
        log_format = ?telemetry_config.log_format,
        "Starting Podium server"
    );

    // Create and run server
    let server = PodiumServer::new(config);
    server.run().await.map_err(Into::into)
}
