//! Matchmaker aggregate: the Waiting Pool and the Session Registry together.
//!
//! Every operation here is one consistent step over both structures, so a
//! caller holding the aggregate behind a single lock gets atomic pairing:
//! no connection can be matched into a session that is already claimed, and
//! pool membership stays mutually exclusive with session membership.

use super::{
    entity::{Session, SessionState},
    error::ProtocolError,
    factory::SessionIdFactory,
    session_registry::{Delivery, Departure, SessionRegistry},
    value_object::{ConnectionId, SessionId, Timestamp},
    waiting_pool::WaitingPool,
};

/// Result of an enqueue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingOutcome {
    /// No partner yet; the connection stays in the pool.
    Waiting,
    /// A session was formed. `trigger` is the connection whose enqueue
    /// completed the pair.
    Paired {
        session: Session,
        trigger: ConnectionId,
    },
}

/// Point-in-time copy of the matchmaking state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LobbySnapshot {
    /// Waiting connections, oldest first.
    pub waiting: Vec<ConnectionId>,
    /// Sessions ordered by creation time.
    pub sessions: Vec<Session>,
}

impl LobbySnapshot {
    pub fn count_sessions(&self, state: SessionState) -> usize {
        self.sessions
            .iter()
            .filter(|session| session.state == state)
            .count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Matchmaker {
    pool: WaitingPool,
    registry: SessionRegistry,
}

impl Matchmaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `connection_id` and try to form a pair right away.
    ///
    /// # Errors
    ///
    /// `ProtocolError::AlreadyQueued` if the connection is already waiting or
    /// holds a session (in any state).
    pub fn enqueue(
        &mut self,
        connection_id: ConnectionId,
        now: Timestamp,
    ) -> Result<PairingOutcome, ProtocolError> {
        if self.registry.contains_participant(&connection_id) {
            return Err(ProtocolError::AlreadyQueued(connection_id));
        }
        self.pool.enqueue(connection_id.clone())?;

        match self.pool.try_dequeue_pair() {
            Some((first, second)) => {
                let session = Session::new(SessionIdFactory::generate(), first, second, now);
                self.registry.register(session.clone());
                Ok(PairingOutcome::Paired {
                    session,
                    trigger: connection_id,
                })
            }
            None => Ok(PairingOutcome::Waiting),
        }
    }

    /// Route `text` from `sender` to the partner in the sender's session.
    pub fn route(
        &self,
        sender: &ConnectionId,
        text: &str,
        sent_at: Timestamp,
    ) -> Result<Delivery, ProtocolError> {
        let session_id = self
            .registry
            .session_of(sender)
            .map(|session| session.id.clone())
            .ok_or(ProtocolError::UnknownSession)?;
        self.registry.route(&session_id, sender, text, sent_at)
    }

    /// Forget `connection_id`: leave its session, or else leave the pool.
    pub fn disconnect(&mut self, connection_id: &ConnectionId) -> Departure {
        match self.registry.on_disconnect(connection_id) {
            Departure::Unknown if self.pool.remove(connection_id) => Departure::LeftPool,
            departure => departure,
        }
    }

    pub fn end_session(&mut self, session_id: &SessionId) -> Option<Session> {
        self.registry.end_session(session_id)
    }

    pub fn session_of(&self, connection_id: &ConnectionId) -> Option<&Session> {
        self.registry.session_of(connection_id)
    }

    pub fn is_waiting(&self, connection_id: &ConnectionId) -> bool {
        self.pool.contains(connection_id)
    }

    pub fn snapshot(&self) -> LobbySnapshot {
        let mut sessions: Vec<Session> = self.registry.sessions().cloned().collect();
        sessions.sort_by_key(|session| session.created_at);
        LobbySnapshot {
            waiting: self.pool.iter().cloned().collect(),
            sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn now() -> Timestamp {
        Timestamp::new(1000)
    }

    fn expect_paired(outcome: PairingOutcome) -> (Session, ConnectionId) {
        match outcome {
            PairingOutcome::Paired { session, trigger } => (session, trigger),
            PairingOutcome::Waiting => panic!("expected a pairing"),
        }
    }

    #[test]
    fn test_first_enqueue_waits() {
        // テスト項目: 最初の参加者は待機状態になる
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();

        // when (操作):
        let outcome = matchmaker.enqueue(connection("alice"), now()).unwrap();

        // then (期待する結果):
        assert_eq!(outcome, PairingOutcome::Waiting);
        assert!(matchmaker.is_waiting(&connection("alice")));
    }

    #[test]
    fn test_second_enqueue_pairs_and_is_trigger() {
        // テスト項目: 2人目の enqueue でペアが成立し、2人目がトリガーになる
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();
        matchmaker.enqueue(connection("alice"), now()).unwrap();

        // when (操作):
        let outcome = matchmaker.enqueue(connection("bob"), now()).unwrap();

        // then (期待する結果):
        let (session, trigger) = expect_paired(outcome);
        assert_eq!(trigger, connection("bob"));
        assert_eq!(session.participant_a, connection("alice"));
        assert_eq!(session.participant_b, connection("bob"));
        assert!(!matchmaker.is_waiting(&connection("alice")));
        assert!(!matchmaker.is_waiting(&connection("bob")));
        assert_eq!(
            matchmaker.session_of(&connection("alice")).map(|s| &s.id),
            Some(&session.id)
        );
    }

    #[test]
    fn test_third_connection_keeps_waiting() {
        // テスト項目: A, B, C の順で参加すると A と B がペアになり C は待機し続ける
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();
        matchmaker.enqueue(connection("a"), now()).unwrap();
        matchmaker.enqueue(connection("b"), now()).unwrap();

        // when (操作):
        let outcome = matchmaker.enqueue(connection("c"), now()).unwrap();

        // then (期待する結果):
        assert_eq!(outcome, PairingOutcome::Waiting);
        let snapshot = matchmaker.snapshot();
        assert_eq!(snapshot.waiting, vec![connection("c")]);
        assert_eq!(snapshot.count_sessions(SessionState::Active), 1);

        // 4人目が来ると C とペアになる
        let (session, _) = expect_paired(matchmaker.enqueue(connection("d"), now()).unwrap());
        assert_eq!(session.participant_a, connection("c"));
        assert_eq!(session.participant_b, connection("d"));
    }

    #[test]
    fn test_enqueue_while_paired_is_rejected() {
        // テスト項目: セッション中の接続は再度 enqueue できない
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();
        matchmaker.enqueue(connection("alice"), now()).unwrap();
        matchmaker.enqueue(connection("bob"), now()).unwrap();

        // when (操作):
        let result = matchmaker.enqueue(connection("alice"), now());

        // then (期待する結果):
        assert_eq!(result, Err(ProtocolError::AlreadyQueued(connection("alice"))));
        assert!(matchmaker.snapshot().waiting.is_empty());
    }

    #[test]
    fn test_pool_never_holds_session_participants() {
        // テスト項目: どんな enqueue の順序でも、待機プールとセッション参加者は重ならない
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();
        let names = ["a", "b", "a", "c", "b", "d", "e", "c", "f", "e"];

        for name in names {
            // when (操作):
            let _ = matchmaker.enqueue(connection(name), now());

            // then (期待する結果):
            let snapshot = matchmaker.snapshot();
            for waiting in &snapshot.waiting {
                assert!(
                    snapshot
                        .sessions
                        .iter()
                        .all(|session| !session.is_participant(waiting)),
                    "'{}' is both waiting and paired",
                    waiting
                );
            }
        }
    }

    #[test]
    fn test_route_goes_to_partner() {
        // テスト項目: 送信者のセッション相手にだけ配送される
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();
        for name in ["a", "b", "c", "d"] {
            matchmaker.enqueue(connection(name), now()).unwrap();
        }

        // when (操作):
        let delivery = matchmaker.route(&connection("c"), "hello", now()).unwrap();

        // then (期待する結果):
        assert_eq!(delivery.recipient, connection("d"));
    }

    #[test]
    fn test_route_without_session() {
        // テスト項目: セッションを持たない接続からの送信は UnknownSession になる
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();
        matchmaker.enqueue(connection("alice"), now()).unwrap();

        // when (操作):
        let result = matchmaker.route(&connection("alice"), "hello", now());

        // then (期待する結果):
        assert_eq!(result, Err(ProtocolError::UnknownSession));
    }

    #[test]
    fn test_disconnect_waiting_connection() {
        // テスト項目: 待機中の接続が切断すると待機プールから外れる
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();
        matchmaker.enqueue(connection("alice"), now()).unwrap();

        // when (操作):
        let departure = matchmaker.disconnect(&connection("alice"));

        // then (期待する結果):
        assert_eq!(departure, Departure::LeftPool);
        assert!(matchmaker.snapshot().waiting.is_empty());
        assert_eq!(matchmaker.disconnect(&connection("alice")), Departure::Unknown);
    }

    #[test]
    fn test_disconnect_paired_connection() {
        // テスト項目: ペア中の切断で残った参加者が返され、以降の送信は失敗する
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();
        matchmaker.enqueue(connection("alice"), now()).unwrap();
        matchmaker.enqueue(connection("bob"), now()).unwrap();

        // when (操作):
        let departure = matchmaker.disconnect(&connection("bob"));

        // then (期待する結果):
        match departure {
            Departure::LeftSession { remaining, .. } => assert_eq!(remaining, connection("alice")),
            other => panic!("unexpected departure: {:?}", other),
        }
        assert_eq!(
            matchmaker.route(&connection("alice"), "hello?", now()),
            Err(ProtocolError::UnknownSession)
        );
    }

    #[test]
    fn test_end_session_allows_requeue() {
        // テスト項目: 相手が去ったセッションを end_session すると再度 enqueue できる
        // given (前提条件):
        let mut matchmaker = Matchmaker::new();
        matchmaker.enqueue(connection("alice"), now()).unwrap();
        matchmaker.enqueue(connection("bob"), now()).unwrap();
        matchmaker.disconnect(&connection("bob"));
        let session_id = matchmaker.session_of(&connection("alice")).unwrap().id.clone();

        // when (操作):
        let ended = matchmaker.end_session(&session_id);
        let outcome = matchmaker.enqueue(connection("alice"), now());

        // then (期待する結果):
        assert!(ended.is_some());
        assert_eq!(outcome, Ok(PairingOutcome::Waiting));
        assert!(matchmaker.snapshot().sessions.is_empty());
    }
}
