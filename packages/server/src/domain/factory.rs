//! Identifier factories.

use uuid::Uuid;

use super::value_object::{ConnectionId, SessionId};

/// Generates fresh connection ids (UUID v4).
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(Uuid::new_v4())
    }
}

/// Generates fresh session ids (UUID v4).
pub struct SessionIdFactory;

impl SessionIdFactory {
    pub fn generate() -> SessionId {
        SessionId::from_uuid(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる UUID になる
        // given (前提条件):

        // when (操作):
        let first = ConnectionIdFactory::generate();
        let second = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }

    #[test]
    fn test_generated_session_ids_are_unique() {
        // テスト項目: 生成される SessionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = SessionIdFactory::generate();
        let second = SessionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
