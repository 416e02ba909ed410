//! HTTP and WebSocket request handlers.

mod http;
mod websocket;

pub use http::{debug_lobby_state, get_stats, health_check};
pub use websocket::websocket_handler;
