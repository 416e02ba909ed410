//! UseCase: メッセージ中継処理
//!
//! 送信者が参加しているセッションの相手に `sendMessage` を届けます。
//! 送信者の ID はサーバーが付与し、クライアントが名乗った ID は使いません。

use std::sync::Arc;

use randomly_shared::time::Clock;

use crate::{
    domain::{
        ConnectionId, Delivery, LobbyRepository, MessagePusher, ProtocolError, ServerEvent,
        Timestamp,
    },
    usecase::disconnect_participant::release_connection,
};

/// メッセージ中継のユースケース
pub struct SendMessageUseCase {
    /// Repository（マッチング状態の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 時刻の取得元
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// メッセージ中継を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Delivery)` - 相手に送信したメッセージ
    /// * `Err(ProtocolError::UnknownSession)` - 進行中のセッションに参加していない
    /// * `Err(ProtocolError::EmptyMessage)` - 空白のみのメッセージ
    /// * `Err(ProtocolError::TransportClosed)` - 相手が既に切断されていた（相手は解放済み）
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        text: &str,
    ) -> Result<Delivery, ProtocolError> {
        let sent_at = Timestamp::new(self.clock.now_millis());
        let delivery = self.repository.route(sender, text, sent_at).await?;

        let event = ServerEvent::PartnerMessage {
            content: delivery.message.content.clone(),
            from: delivery.message.from.clone(),
        };
        if let Err(e) = self
            .message_pusher
            .push_to(&delivery.recipient, &event)
            .await
        {
            tracing::warn!(
                "Failed to relay message to '{}': {}",
                delivery.recipient,
                e
            );
            release_connection(
                self.repository.as_ref(),
                self.message_pusher.as_ref(),
                &delivery.recipient,
            )
            .await;
            return Err(ProtocolError::TransportClosed(delivery.recipient));
        }

        Ok(delivery)
    }
}
