//! HTTP route handlers and router configuration

mod admin;
mod score;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the main application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(admin::health))
        // Server statistics
        .route("/api/stats", get(admin::stats))
        // Score submission and leaderboard reads
        .route("/api/score/:world", post(score::submit).get(score::top))
        .route("/api/score/:world/stats", get(score::world_stats))
        .with_state(state.clone());

    // Add middleware
    let mut router = router.layer(TraceLayer::new_for_http());

    // Add CORS if enabled
    if state.config.cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}
