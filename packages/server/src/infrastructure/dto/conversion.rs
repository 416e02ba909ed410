//! Conversion logic between DTOs and domain types.

use randomly_shared::time::timestamp_to_rfc3339;

use crate::domain::{LobbySnapshot, ServerEvent, Session, SessionState};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → DTO
// ========================================

impl From<ServerEvent> for dto::ServerMessage {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::Waiting => Self::Waiting,
            ServerEvent::Welcome { message, id } => Self::Welcome {
                message,
                id: id.into_string(),
            },
            ServerEvent::StrangerJoined => Self::StrangerJoined,
            ServerEvent::PartnerMessage { content, from } => Self::SendMessage {
                message: content.into_string(),
                id: from.into_string(),
            },
            ServerEvent::Leave => Self::Leave,
        }
    }
}

impl From<Session> for http::SessionSummaryDto {
    fn from(session: Session) -> Self {
        Self {
            id: session.id.as_str().to_string(),
            participants: session
                .participants()
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            state: session.state.as_str().to_string(),
            created_at: timestamp_to_rfc3339(session.created_at.value()),
        }
    }
}

impl From<&LobbySnapshot> for http::LobbyStatsDto {
    fn from(snapshot: &LobbySnapshot) -> Self {
        Self {
            waiting: snapshot.waiting.len(),
            active_sessions: snapshot.count_sessions(SessionState::Active),
            partner_left_sessions: snapshot.count_sessions(SessionState::PartnerLeft),
        }
    }
}

impl From<LobbySnapshot> for http::LobbySnapshotDto {
    fn from(snapshot: LobbySnapshot) -> Self {
        Self {
            waiting: snapshot
                .waiting
                .into_iter()
                .map(|id| id.into_string())
                .collect(),
            sessions: snapshot.sessions.into_iter().map(Into::into).collect(),
        }
    }
}
