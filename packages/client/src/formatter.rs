//! Message formatting utilities for client display.

use randomly_shared::time::timestamp_to_clock_time;

use crate::view::{Author, ChatLine, ViewChange, ViewState};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format one history line
    ///
    /// # Arguments
    ///
    /// * `line` - The line to render
    ///
    /// # Returns
    ///
    /// A formatted string such as `[15:00:00] Stranger: hi`
    pub fn format_line(line: &ChatLine) -> String {
        let time = timestamp_to_clock_time(line.timestamp);
        match line.author {
            Author::Me => format!("\n[{}] You: {}\n", time, line.text),
            Author::Stranger => format!("\n[{}] Stranger: {}\n", time, line.text),
            Author::System => format!("\n[{}] {}\n", time, line.text),
        }
    }

    /// Format a status line; an empty status renders nothing
    pub fn format_status(status: &str) -> String {
        if status.is_empty() {
            String::new()
        } else {
            format!("\n* {}\n", status)
        }
    }

    /// Format everything an applied event changed
    pub fn format_change(change: &ViewChange) -> String {
        let mut output = String::new();
        if let Some(status) = &change.status {
            output.push_str(&Self::format_status(status));
        }
        for line in &change.lines {
            output.push_str(&Self::format_line(line));
        }
        output
    }

    /// Format the hint shown when the user types in a state that does not accept it
    pub fn format_hint(state: ViewState) -> String {
        let hint = match state {
            ViewState::Searching => "Still looking for a stranger. Type /quit to exit.",
            ViewState::Chatting => "Type a message and press Enter. Type /quit to exit.",
            ViewState::PartnerLeft => "Type /next to find a new stranger or /quit to exit.",
        };
        format!("\n({})\n", hint)
    }
}
