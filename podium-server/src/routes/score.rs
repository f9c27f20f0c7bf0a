//! Score endpoints: submit a score, read a leaderboard.

use crate::error::Result;
use crate::state::AppState;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use podium_store::{Leaderboard, RankedRecord, WorldStats};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::net::SocketAddr;
use std::sync::Arc;

/// Submit response: the 1-based global rank, or `0` when the submission was
/// rejected by validation ("not recorded").
#[derive(Serialize)]
pub struct SubmitResponse {
    /// 1-based rank of the recorded score, 0 if not recorded
    pub rank: u64,
}

/// Record a score for a world
///
/// POST /api/score/:world    body: `{"score": 1234}`
///
/// The player identity is the caller's IP: the first `X-Forwarded-For` value
/// when present (deployments behind a proxy), otherwise the peer address of
/// the connection. A missing or non-positive-integer score, a malformed world
/// id, or an unidentifiable caller yields rank 0 in a 200 response; the
/// sentinel is part of the contract, not an error.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(world): Path<String>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(body): Json<JsonValue>,
) -> Result<Json<SubmitResponse>> {
    let player =
        client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr)).unwrap_or_default();
    let score = body.get("score").and_then(JsonValue::as_u64).unwrap_or(0);

    let rank = state.store.submit(&world, &player, score).await?;
    tracing::debug!(world = %world, player = %player, score, rank, "score submission handled");
    Ok(Json(SubmitResponse { rank }))
}

/// Query parameters for leaderboard reads
#[derive(Deserialize)]
pub struct TopParams {
    /// Page size; clamped to the configured maximum
    pub limit: Option<usize>,
}

/// Leaderboard page response
#[derive(Serialize)]
pub struct TopResponse {
    /// The world read
    pub world: String,
    /// Highest-ranked records, descending
    pub entries: Vec<RankedRecord>,
}

/// Read the top of a world's leaderboard
///
/// GET /api/score/:world?limit=25
///
/// An absent world answers with an empty page.
pub async fn top(
    State(state): State<Arc<AppState>>,
    Path(world): Path<String>,
    Query(params): Query<TopParams>,
) -> Result<Json<TopResponse>> {
    let limit = params
        .limit
        .unwrap_or(state.config.top_limit_max)
        .min(state.config.top_limit_max);

    let entries = state.store.top(&world, limit).await?;
    Ok(Json(TopResponse { world, entries }))
}

/// Aggregate counts for one world
///
/// GET /api/score/:world/stats
pub async fn world_stats(
    State(state): State<Arc<AppState>>,
    Path(world): Path<String>,
) -> Result<Json<WorldStats>> {
    let stats = state.store.world_stats(&world).await?;
    Ok(Json(stats))
}

/// Resolve the submitting player's identity from the request.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        let first = forwarded.split(',').next().map(str::trim).unwrap_or("");
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }
    peer.map(|addr| addr.ip().to_string())
}
