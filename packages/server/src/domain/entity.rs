//! Domain entities: sessions and chat messages.

use super::value_object::{ConnectionId, MessageContent, SessionId, Timestamp};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Both participants are connected and may exchange messages.
    Active,
    /// One participant left; the record only refuses further routing.
    PartnerLeft,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Active => "active",
            SessionState::PartnerLeft => "partner_left",
        }
    }
}

/// Role of a participant inside a session.
///
/// `A` waited first, `B` triggered the match. Roles only attribute messages;
/// they never change routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    A,
    B,
}

/// One pairing of exactly two connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub participant_a: ConnectionId,
    pub participant_b: ConnectionId,
    pub state: SessionState,
    pub created_at: Timestamp,
}

impl Session {
    pub fn new(
        id: SessionId,
        participant_a: ConnectionId,
        participant_b: ConnectionId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            participant_a,
            participant_b,
            state: SessionState::Active,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn is_participant(&self, connection_id: &ConnectionId) -> bool {
        self.role_of(connection_id).is_some()
    }

    pub fn role_of(&self, connection_id: &ConnectionId) -> Option<Role> {
        if &self.participant_a == connection_id {
            Some(Role::A)
        } else if &self.participant_b == connection_id {
            Some(Role::B)
        } else {
            None
        }
    }

    /// The other participant, or `None` if `connection_id` is not in this session.
    pub fn partner_of(&self, connection_id: &ConnectionId) -> Option<&ConnectionId> {
        match self.role_of(connection_id)? {
            Role::A => Some(&self.participant_b),
            Role::B => Some(&self.participant_a),
        }
    }

    pub fn participants(&self) -> [&ConnectionId; 2] {
        [&self.participant_a, &self.participant_b]
    }

    pub fn mark_partner_left(&mut self) {
        self.state = SessionState::PartnerLeft;
    }
}

/// A message in transit between the two participants of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub session_id: SessionId,
    pub from: ConnectionId,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(
        session_id: SessionId,
        from: ConnectionId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            session_id,
            from,
            content,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn create_test_session() -> Session {
        Session::new(
            SessionId::new("session-1".to_string()).unwrap(),
            connection("alice"),
            connection("bob"),
            Timestamp::new(1000),
        )
    }

    #[test]
    fn test_new_session_is_active() {
        // テスト項目: 新しいセッションは Active 状態で作成される
        // given (前提条件):

        // when (操作):
        let session = create_test_session();

        // then (期待する結果):
        assert!(session.is_active());
        assert_eq!(session.state, SessionState::Active);
    }

    #[test]
    fn test_partner_of_returns_other_participant() {
        // テスト項目: partner_of は相手側の参加者を返す
        // given (前提条件):
        let session = create_test_session();

        // when (操作):
        let partner_of_alice = session.partner_of(&connection("alice"));
        let partner_of_bob = session.partner_of(&connection("bob"));
        let partner_of_charlie = session.partner_of(&connection("charlie"));

        // then (期待する結果):
        assert_eq!(partner_of_alice, Some(&connection("bob")));
        assert_eq!(partner_of_bob, Some(&connection("alice")));
        assert_eq!(partner_of_charlie, None);
    }

    #[test]
    fn test_role_of_tags_participants() {
        // テスト項目: 先に待っていた参加者が A、マッチを発生させた参加者が B になる
        // given (前提条件):
        let session = create_test_session();

        // when (操作):
        let role_alice = session.role_of(&connection("alice"));
        let role_bob = session.role_of(&connection("bob"));

        // then (期待する結果):
        assert_eq!(role_alice, Some(Role::A));
        assert_eq!(role_bob, Some(Role::B));
        assert!(!session.is_participant(&connection("charlie")));
    }

    #[test]
    fn test_mark_partner_left() {
        // テスト項目: mark_partner_left で PartnerLeft 状態に遷移する
        // given (前提条件):
        let mut session = create_test_session();

        // when (操作):
        session.mark_partner_left();

        // then (期待する結果):
        assert!(!session.is_active());
        assert_eq!(session.state.as_str(), "partner_left");
    }
}
