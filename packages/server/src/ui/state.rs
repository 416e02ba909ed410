//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetLobbyStateUseCase,
    JoinMatchUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// JoinMatchUseCase（マッチング参加のユースケース）
    pub join_match_usecase: Arc<JoinMatchUseCase>,
    /// SendMessageUseCase（メッセージ中継のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// GetLobbyStateUseCase（ロビー状態取得のユースケース）
    pub get_lobby_state_usecase: Arc<GetLobbyStateUseCase>,
    /// `/ws` への接続に必要なトークン（None なら誰でも接続可能）
    pub access_token: Option<String>,
}

impl AppState {
    /// Whether a connection presenting `token` may open a WebSocket.
    pub fn is_authorized(&self, token: Option<&str>) -> bool {
        match &self.access_token {
            Some(expected) => token == Some(expected.as_str()),
            None => true,
        }
    }
}
