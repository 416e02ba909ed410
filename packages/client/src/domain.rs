//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// A line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Find a new stranger (only after the partner left)
    Next,
    /// End the chat and exit
    Quit,
    /// Chat text for the current partner
    Say(String),
}

/// Interpret one input line.
pub fn parse_command(line: &str) -> Command {
    match line.trim() {
        "/next" => Command::Next,
        "/quit" => Command::Quit,
        _ => Command::Say(line.to_string()),
    }
}

/// Build the WebSocket URL, appending `?token=` when a token is given.
pub fn connect_url(url: &str, token: Option<&str>) -> String {
    match token {
        Some(token) => {
            let separator = if url.contains('?') { '&' } else { '?' };
            format!("{}{}token={}", url, separator, token)
        }
        None => url.to_string(),
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if the error requires immediate exit (e.g., Unauthorized),
/// `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::Unauthorized)
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}
