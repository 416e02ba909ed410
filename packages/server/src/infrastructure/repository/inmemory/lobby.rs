//! InMemory Lobby Repository 実装
//!
//! ドメイン層が定義する LobbyRepository trait の具体的な実装。
//! Matchmaker 集約を 1 つの Mutex で保護し、各操作を不可分に実行します。
//!
//! ## 設計ノート
//!
//! 待機プールとセッションレジストリを同じロックで守ることで、
//! 「ペア成立」と「切断」が互いに割り込むことはありません。
//! 異なるセッション間のメッセージ配送もこのロックで直列化されますが、
//! ロック内の処理はハッシュマップ操作のみなので保持時間はごく短いです。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Delivery, Departure, LobbyRepository, LobbySnapshot, Matchmaker,
    PairingOutcome, ProtocolError, Session, SessionId, Timestamp,
};

/// インメモリ Lobby Repository 実装
pub struct InMemoryLobbyRepository {
    /// Matchmaker 集約（待機プール + セッションレジストリ）
    matchmaker: Arc<Mutex<Matchmaker>>,
}

impl InMemoryLobbyRepository {
    /// 新しい InMemoryLobbyRepository を作成
    pub fn new(matchmaker: Arc<Mutex<Matchmaker>>) -> Self {
        Self { matchmaker }
    }
}

impl Default for InMemoryLobbyRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Matchmaker::new())))
    }
}

#[async_trait]
impl LobbyRepository for InMemoryLobbyRepository {
    async fn enqueue(
        &self,
        connection_id: ConnectionId,
        now: Timestamp,
    ) -> Result<PairingOutcome, ProtocolError> {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.enqueue(connection_id, now)
    }

    async fn route(
        &self,
        sender: &ConnectionId,
        text: &str,
        sent_at: Timestamp,
    ) -> Result<Delivery, ProtocolError> {
        let matchmaker = self.matchmaker.lock().await;
        matchmaker.route(sender, text, sent_at)
    }

    async fn disconnect(&self, connection_id: &ConnectionId) -> Departure {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.disconnect(connection_id)
    }

    async fn end_session(&self, session_id: &SessionId) -> Option<Session> {
        let mut matchmaker = self.matchmaker.lock().await;
        matchmaker.end_session(session_id)
    }

    async fn session_of(&self, connection_id: &ConnectionId) -> Option<Session> {
        let matchmaker = self.matchmaker.lock().await;
        matchmaker.session_of(connection_id).cloned()
    }

    async fn snapshot(&self) -> LobbySnapshot {
        let matchmaker = self.matchmaker.lock().await;
        matchmaker.snapshot()
    }
}
