//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断した接続をセッション / 待機プールから外し、相手に `leave` を通知する処理
//!
//! ### なぜこのテストが必要か
//! - 相手が切断したことを残った参加者がちょうど 1 回だけ知る必要がある
//! - 切断後にメッセージが配送されないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：ペア中の参加者の切断
//! - エッジケース：待機中の切断、二重の切断、残った参加者の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, LobbyRepository, MessagePusher, ServerEvent};

/// 接続を解放し、必要なら相手に `leave` を通知する。
///
/// 送信に失敗した接続の後始末（TransportClosed）でも同じ処理を使う。
pub(crate) async fn release_connection(
    repository: &dyn LobbyRepository,
    message_pusher: &dyn MessagePusher,
    connection_id: &ConnectionId,
) -> Departure {
    let departure = repository.disconnect(connection_id).await;
    message_pusher.unregister_client(connection_id).await;

    if let Departure::LeftSession {
        session_id,
        remaining,
    } = &departure
    {
        match message_pusher.push_to(remaining, &ServerEvent::Leave).await {
            Ok(()) => tracing::info!(
                "Notified '{}' that its partner left session '{}'",
                remaining,
                session_id
            ),
            Err(e) => tracing::warn!("Failed to notify '{}' of leave: {}", remaining, e),
        }
    }

    departure
}

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（マッチング状態の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者切断を実行（冪等）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Departure {
        release_connection(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            connection_id,
        )
        .await
    }
}
