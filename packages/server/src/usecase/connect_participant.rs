//! UseCase: 接続受付処理
//!
//! 新しい接続に ConnectionId を払い出し、送信チャンネルを MessagePusher に登録します。
//! この時点ではまだ待機プールには入りません（`joined` を受け取ってから入ります）。

use std::sync::Arc;

use randomly_shared::time::Clock;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel, Timestamp};

/// 接続受付の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedParticipant {
    pub connection_id: ConnectionId,
    pub connected_at: Timestamp,
}

/// 接続受付のユースケース
pub struct ConnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 時刻の取得元
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// 接続受付を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 払い出した ConnectionId と接続時刻
    pub async fn execute(&self, sender: PusherChannel) -> ConnectedParticipant {
        let connection_id = ConnectionIdFactory::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());

        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        ConnectedParticipant {
            connection_id,
            connected_at,
        }
    }
}
