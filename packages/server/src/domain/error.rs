//! Domain error types.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Errors raised while constructing value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("session id must not be empty")]
    EmptySessionId,

    #[error("message must not be empty")]
    EmptyMessage,
}

/// Errors of the matchmaking protocol.
///
/// All of them are recoverable: the affected request is refused and the
/// connection stays open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The connection is already waiting or already holds a session.
    #[error("connection '{0}' is already queued or paired")]
    AlreadyQueued(ConnectionId),

    /// No active session exists for the request.
    #[error("no active session")]
    UnknownSession,

    /// The sender is not one of the two participants of the session.
    #[error("connection '{0}' is not a participant of the session")]
    NotAParticipant(ConnectionId),

    /// The message is empty after trimming.
    #[error("message must not be empty")]
    EmptyMessage,

    /// The connection's transport is gone.
    #[error("transport of connection '{0}' is closed")]
    TransportClosed(ConnectionId),
}

/// Errors raised while pushing events to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not registered")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode event: {0}")]
    EncodeFailed(String),
}
