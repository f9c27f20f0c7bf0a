//! Podium HTTP Server
//!
//! A thin HTTP REST wrapper around `podium-store`, exposing score submission
//! and leaderboard reads per world.
//!
//! # Endpoints
//!
//! - `POST /api/score/:world`: record a score, answer with the global rank
//! - `GET /api/score/:world`: read the top of the leaderboard
//! - `GET /api/score/:world/stats`: per-world aggregate counts
//! - `GET /api/stats`, `GET /health`: server introspection
//!
//! # Example
//!
//! ```ignore
//! use podium_server::{PodiumServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let server = PodiumServer::new(config);
//!     server.run().await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
pub use telemetry::{init_logging, TelemetryConfig};

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Podium HTTP server
pub struct PodiumServer {
    /// Application state
    state: Arc<AppState>,
    /// Configured router
    router: Router,
}

impl PodiumServer {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::new(config));
        let router = routes::build_router(state.clone());
        Self { state, router }
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get the router for testing
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server
    pub async fn run(self) -> std::io::Result<()> {
        let addr = self.state.config.listen_addr;
        let listener = TcpListener::bind(addr).await?;

        info!(
            addr = %addr,
            data_path = %self.state.config.data_path.display(),
            cors = self.state.config.cors_enabled,
            "Podium server starting"
        );

        axum::serve(
            listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }
}
