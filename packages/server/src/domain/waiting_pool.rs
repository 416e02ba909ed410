//! Waiting Pool: FIFO queue of connections that announced readiness.

use std::collections::VecDeque;

use super::{error::ProtocolError, value_object::ConnectionId};

/// Connections waiting for a partner, oldest first.
///
/// The pool only guards against duplicates inside itself. Rejecting
/// connections that already hold a session is the job of
/// [`Matchmaker`](super::Matchmaker), which owns both the pool and the
/// session registry.
#[derive(Debug, Clone, Default)]
pub struct WaitingPool {
    queue: VecDeque<ConnectionId>,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `connection_id` to the end of the queue.
    ///
    /// # Errors
    ///
    /// `ProtocolError::AlreadyQueued` if the connection is already waiting.
    pub fn enqueue(&mut self, connection_id: ConnectionId) -> Result<(), ProtocolError> {
        if self.contains(&connection_id) {
            return Err(ProtocolError::AlreadyQueued(connection_id));
        }
        self.queue.push_back(connection_id);
        Ok(())
    }

    /// Remove and return the two earliest-enqueued connections, if there are two.
    pub fn try_dequeue_pair(&mut self) -> Option<(ConnectionId, ConnectionId)> {
        if self.queue.len() < 2 {
            return None;
        }
        let first = self.queue.pop_front()?;
        let second = self.queue.pop_front()?;
        Some((first, second))
    }

    /// Remove `connection_id` if present. Returns whether it was waiting.
    pub fn remove(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|id| id != connection_id);
        self.queue.len() != before
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.queue.contains(connection_id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Waiting connections in FIFO order.
    pub fn iter(&self) -> impl Iterator<Item = &ConnectionId> {
        self.queue.iter()
    }
}
