//! Domain layer: matchmaking model and the interfaces it needs.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod matchmaker;
pub mod message_pusher;
pub mod repository;
pub mod session_registry;
pub mod value_object;
pub mod waiting_pool;

pub use entity::{ChatMessage, Role, Session, SessionState};
pub use error::{MessagePushError, ProtocolError, ValueObjectError};
pub use event::ServerEvent;
pub use factory::{ConnectionIdFactory, SessionIdFactory};
pub use matchmaker::{LobbySnapshot, Matchmaker, PairingOutcome};
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::LobbyRepository;
pub use session_registry::{Delivery, Departure, SessionRegistry};
pub use value_object::{ConnectionId, MessageContent, SessionId, Timestamp};
pub use waiting_pool::WaitingPool;
