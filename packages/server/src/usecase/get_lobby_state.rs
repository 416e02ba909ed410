//! UseCase: ロビー状態取得処理

use std::sync::Arc;

use crate::domain::{LobbyRepository, LobbySnapshot};

/// ロビー状態取得のユースケース
pub struct GetLobbyStateUseCase {
    /// Repository（マッチング状態の抽象化）
    repository: Arc<dyn LobbyRepository>,
}

impl GetLobbyStateUseCase {
    /// 新しい GetLobbyStateUseCase を作成
    pub fn new(repository: Arc<dyn LobbyRepository>) -> Self {
        Self { repository }
    }

    /// 待機プールとセッション一覧のスナップショットを取得
    pub async fn execute(&self) -> LobbySnapshot {
        self.repository.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, SessionState, Timestamp},
        infrastructure::repository::InMemoryLobbyRepository,
    };

    #[tokio::test]
    async fn test_snapshot_reflects_pool_and_sessions() {
        // テスト項目: 3 人参加した時点で 1 セッション + 1 人待機となる
        // given (前提条件):
        let repository = Arc::new(InMemoryLobbyRepository::default());
        for name in ["a", "b", "c"] {
            repository
                .enqueue(ConnectionId::new(name.to_string()).unwrap(), Timestamp::new(1))
                .await
                .unwrap();
        }
        let usecase = GetLobbyStateUseCase::new(repository);

        // when (操作):
        let snapshot = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(snapshot.waiting.len(), 1);
        assert_eq!(snapshot.waiting[0].as_str(), "c");
        assert_eq!(snapshot.count_sessions(SessionState::Active), 1);
    }
}
