//! UseCase: マッチング参加処理（Pairing Engine）
//!
//! `joined` を受け取った接続を待機プールに入れ、2 人揃った時点でセッションを作成します。
//! ペア成立時は、ペアを成立させた側（後から来た側）に `welcome` を、
//! 先に待っていた側に `strangerJoined` を送ります。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinMatchUseCase::execute() メソッド
//! - 待機通知、ペア成立通知、再マッチング、送信失敗時の後始末
//!
//! ### なぜこのテストが必要か
//! - 参加者は常に「待機中」「1 つのセッションに参加中」「未参加」のいずれかでなければならない
//! - 通知の宛先と順序がクライアントの表示状態を決めるため
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 人目の待機、2 人目でのペア成立、4 人での 2 ペア成立
//! - 異常系：ペア中の `joined`、送信先の切断
//! - エッジケース：相手が去ったセッションからの再マッチング

use std::sync::Arc;

use randomly_shared::time::Clock;

use crate::{
    domain::{
        ConnectionId, LobbyRepository, MessagePusher, PairingOutcome, ProtocolError, ServerEvent,
        Timestamp,
    },
    usecase::disconnect_participant::release_connection,
};

/// ペア成立時の `welcome` に載せる既定のメッセージ
pub const DEFAULT_WELCOME_MESSAGE: &str = "You are now chatting with a random stranger. Say hi!";

/// マッチング参加のユースケース
pub struct JoinMatchUseCase {
    /// Repository（マッチング状態の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 時刻の取得元
    clock: Arc<dyn Clock>,
    /// `welcome` に載せるメッセージ
    welcome_message: String,
}

impl JoinMatchUseCase {
    /// 新しい JoinMatchUseCase を作成
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        welcome_message: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            welcome_message: welcome_message.into(),
        }
    }

    /// マッチング参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(PairingOutcome)` - 待機に入った、またはペアが成立した
    /// * `Err(ProtocolError::AlreadyQueued)` - 既に待機中、または進行中のセッションに参加中
    /// * `Err(ProtocolError::TransportClosed)` - 通知先が既に切断されていた（その接続は解放済み）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<PairingOutcome, ProtocolError> {
        // 相手が去ったセッションに残っている場合は、そのセッションを閉じてから並び直す
        if let Some(session) = self.repository.session_of(connection_id).await
            && !session.is_active()
        {
            self.repository.end_session(&session.id).await;
            tracing::info!(
                "Connection '{}' left ended session '{}' to find a new stranger",
                connection_id,
                session.id
            );
        }

        let now = Timestamp::new(self.clock.now_millis());
        let outcome = self.repository.enqueue(connection_id.clone(), now).await?;

        match &outcome {
            PairingOutcome::Waiting => {
                tracing::info!("Connection '{}' is waiting for a stranger", connection_id);
                if let Err(e) = self
                    .message_pusher
                    .push_to(connection_id, &ServerEvent::Waiting)
                    .await
                {
                    tracing::warn!("Failed to notify '{}' of waiting: {}", connection_id, e);
                    self.release(connection_id).await;
                    return Err(ProtocolError::TransportClosed(connection_id.clone()));
                }
            }
            PairingOutcome::Paired { session, trigger } => {
                let partner = session
                    .partner_of(trigger)
                    .cloned()
                    .ok_or_else(|| ProtocolError::NotAParticipant(trigger.clone()))?;
                tracing::info!(
                    "Session '{}' started between '{}' and '{}'",
                    session.id,
                    partner,
                    trigger
                );

                let welcome = ServerEvent::Welcome {
                    message: self.welcome_message.clone(),
                    id: trigger.clone(),
                };
                let welcome_result = self.message_pusher.push_to(trigger, &welcome).await;
                let joined_result = self
                    .message_pusher
                    .push_to(&partner, &ServerEvent::StrangerJoined)
                    .await;

                let mut closed: Option<ConnectionId> = None;
                for (target, result) in [(trigger, welcome_result), (&partner, joined_result)] {
                    if let Err(e) = result {
                        tracing::warn!("Failed to notify '{}' of pairing: {}", target, e);
                        self.release(target).await;
                        closed.get_or_insert_with(|| target.clone());
                    }
                }
                if let Some(target) = closed {
                    return Err(ProtocolError::TransportClosed(target));
                }
            }
        }

        Ok(outcome)
    }

    async fn release(&self, connection_id: &ConnectionId) {
        release_connection(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            connection_id,
        )
        .await;
    }
}
