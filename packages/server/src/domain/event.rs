//! Events the server pushes to connected clients.

use super::value_object::{ConnectionId, MessageContent};

/// Server-to-client lifecycle and delivery events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Still unpaired.
    Waiting,
    /// Pairing formed; `id` is the recipient's own identity stamp.
    Welcome { message: String, id: ConnectionId },
    /// Partner side's pairing confirmation.
    StrangerJoined,
    /// Message routed from the partner; `from` is the partner's identity stamp.
    PartnerMessage {
        content: MessageContent,
        from: ConnectionId,
    },
    /// Partner disconnected.
    Leave,
}

impl ServerEvent {
    /// Short event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Waiting => "waiting",
            ServerEvent::Welcome { .. } => "welcome",
            ServerEvent::StrangerJoined => "strangerJoined",
            ServerEvent::PartnerMessage { .. } => "sendMessage",
            ServerEvent::Leave => "leave",
        }
    }
}
