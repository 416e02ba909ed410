//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{LobbySnapshotDto, LobbyStatsDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Matchmaking counters
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<LobbyStatsDto> {
    let snapshot = state.get_lobby_state_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(LobbyStatsDto::from(&snapshot))
}

/// Debug endpoint to get the waiting pool and every session (for testing purposes)
pub async fn debug_lobby_state(State(state): State<Arc<AppState>>) -> Json<LobbySnapshotDto> {
    let snapshot = state.get_lobby_state_usecase.execute().await;
    Json(snapshot.into())
}
