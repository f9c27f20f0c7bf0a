//! Admin endpoints: /health, /api/stats

use crate::error::Result;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
///
/// GET /health
///
/// Returns a simple health check response to verify the server is running.
pub async fn health() -> Json<HealthResponse> {
    tracing::debug!("health check requested");
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Server statistics response
#[derive(Serialize)]
pub struct StatsResponse {
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Worlds present under the data root
    pub worlds: Vec<String>,
    /// Server version
    pub version: &'static str,
}

/// Server statistics endpoint
///
/// GET /api/stats
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>> {
    let worlds = state.store.worlds().await?;
    tracing::debug!(worlds = worlds.len(), "server stats requested");

    Ok(Json(StatsResponse {
        uptime_secs: state.uptime_secs(),
        worlds,
        version: env!("CARGO_PKG_VERSION"),
    }))
}
