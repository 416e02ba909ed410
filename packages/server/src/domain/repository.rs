//! Repository trait 定義
//!
//! ドメイン層が必要とするマッチング状態へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ConnectionId, Delivery, Departure, LobbySnapshot, PairingOutcome, ProtocolError, Session,
    SessionId, Timestamp,
};

/// Lobby Repository trait
///
/// 待機プールとセッションレジストリへのインターフェース。
/// 各メソッドは 1 回の操作として不可分に実行されなければならない。
#[async_trait]
pub trait LobbyRepository: Send + Sync {
    /// 待機プールに追加し、可能ならその場でペアを作る
    async fn enqueue(
        &self,
        connection_id: ConnectionId,
        now: Timestamp,
    ) -> Result<PairingOutcome, ProtocolError>;

    /// 送信者のセッション相手への配送先を解決する
    async fn route(
        &self,
        sender: &ConnectionId,
        text: &str,
        sent_at: Timestamp,
    ) -> Result<Delivery, ProtocolError>;

    /// 切断した接続をセッションまたは待機プールから外す
    async fn disconnect(&self, connection_id: &ConnectionId) -> Departure;

    /// セッションを完全に解放する
    async fn end_session(&self, session_id: &SessionId) -> Option<Session>;

    /// 接続が属しているセッションを取得
    async fn session_of(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// 待機プールとセッション一覧のスナップショットを取得
    async fn snapshot(&self) -> LobbySnapshot;
}
