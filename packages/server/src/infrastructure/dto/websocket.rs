//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by `type`, for example
//! `{"type":"sendMessage","message":"hi","id":"5b0c..."}`.

use serde::{Deserialize, Serialize};

/// Client → server events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Announce readiness to be paired
    Joined,
    /// Send text to the current partner
    Message {
        message: String,
        /// Identity stamp claimed by the sender; the server attributes
        /// messages by connection, never by this field.
        #[serde(default)]
        id: String,
    },
}

/// Server → client events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Still unpaired
    Waiting,
    /// Pairing formed; `id` is the recipient's own identity stamp
    Welcome { message: String, id: String },
    /// Partner side's pairing confirmation
    StrangerJoined,
    /// Message routed from the partner; `id` is the partner's identity stamp
    SendMessage { message: String, id: String },
    /// Partner disconnected
    Leave,
}
