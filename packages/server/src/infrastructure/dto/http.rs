//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Matchmaking counters returned by `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyStatsDto {
    pub waiting: usize,
    pub active_sessions: usize,
    pub partner_left_sessions: usize,
}

/// One session as shown by `GET /debug/lobby`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub id: String,
    pub participants: Vec<String>,
    pub state: String,
    pub created_at: String,
}

/// Full lobby state returned by `GET /debug/lobby`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbySnapshotDto {
    pub waiting: Vec<String>,
    pub sessions: Vec<SessionSummaryDto>,
}
