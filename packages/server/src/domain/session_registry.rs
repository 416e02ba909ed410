//! Session Registry: owns sessions, routes messages, tracks departures.

use std::collections::HashMap;

use super::{
    entity::{ChatMessage, Session, SessionState},
    error::ProtocolError,
    value_object::{ConnectionId, MessageContent, SessionId, Timestamp},
};

/// A routed message and the participant it must be delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: ConnectionId,
    pub message: ChatMessage,
}

/// What a disconnect did to the matchmaking state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// The connection left an active session; `remaining` must be told.
    LeftSession {
        session_id: SessionId,
        remaining: ConnectionId,
    },
    /// The last participant of a `PartnerLeft` session left; the record is gone.
    SessionReleased(SessionId),
    /// The connection was waiting and has been removed from the pool.
    LeftPool,
    /// The connection was neither waiting nor paired.
    Unknown,
}

/// Sessions by id, plus the connection → session membership index.
///
/// Invariant: every participant of a stored session that is still connected
/// has exactly one membership entry pointing at that session.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    membership: HashMap<ConnectionId, SessionId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly paired session and index both participants.
    pub fn register(&mut self, session: Session) {
        for participant in session.participants() {
            self.membership
                .insert(participant.clone(), session.id.clone());
        }
        self.sessions.insert(session.id.clone(), session);
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    /// Session currently held by `connection_id`, whatever its state.
    pub fn session_of(&self, connection_id: &ConnectionId) -> Option<&Session> {
        self.membership
            .get(connection_id)
            .and_then(|session_id| self.sessions.get(session_id))
    }

    pub fn contains_participant(&self, connection_id: &ConnectionId) -> bool {
        self.membership.contains_key(connection_id)
    }

    /// Resolve the recipient of a message sent by `sender` in `session_id`.
    ///
    /// # Errors
    ///
    /// * `UnknownSession` - no such session, or it is no longer active
    /// * `NotAParticipant` - `sender` is not one of the two participants
    /// * `EmptyMessage` - `text` is empty after trimming
    pub fn route(
        &self,
        session_id: &SessionId,
        sender: &ConnectionId,
        text: &str,
        sent_at: Timestamp,
    ) -> Result<Delivery, ProtocolError> {
        let session = self
            .sessions
            .get(session_id)
            .filter(|session| session.is_active())
            .ok_or(ProtocolError::UnknownSession)?;

        let recipient = session
            .partner_of(sender)
            .ok_or_else(|| ProtocolError::NotAParticipant(sender.clone()))?
            .clone();

        let content =
            MessageContent::new(text.to_string()).map_err(|_| ProtocolError::EmptyMessage)?;

        Ok(Delivery {
            recipient,
            message: ChatMessage::new(session_id.clone(), sender.clone(), content, sent_at),
        })
    }

    /// Handle the disconnect of `connection_id`.
    ///
    /// Returns [`Departure::Unknown`] when the connection holds no session so
    /// the caller can fall back to the waiting pool.
    pub fn on_disconnect(&mut self, connection_id: &ConnectionId) -> Departure {
        let Some(session_id) = self.membership.remove(connection_id) else {
            return Departure::Unknown;
        };
        let Some(session) = self.sessions.get_mut(&session_id) else {
            return Departure::Unknown;
        };

        let state = session.state;
        match state {
            SessionState::Active => {
                session.mark_partner_left();
                match session.partner_of(connection_id) {
                    Some(remaining) => Departure::LeftSession {
                        session_id,
                        remaining: remaining.clone(),
                    },
                    None => Departure::Unknown,
                }
            }
            SessionState::PartnerLeft => {
                self.sessions.remove(&session_id);
                Departure::SessionReleased(session_id)
            }
        }
    }

    /// Release a session record entirely. Returns the removed session.
    pub fn end_session(&mut self, session_id: &SessionId) -> Option<Session> {
        let session = self.sessions.remove(session_id)?;
        for participant in session.participants() {
            if self.membership.get(participant) == Some(session_id) {
                self.membership.remove(participant);
            }
        }
        Some(session)
    }

    pub fn count_in_state(&self, state: SessionState) -> usize {
        self.sessions
            .values()
            .filter(|session| session.state == state)
            .count()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }
}
