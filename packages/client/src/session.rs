//! WebSocket client session management.
//!
//! One session is one connection: it sends `joined`, follows the pairing
//! through a `ChatView` and ends when the user quits or asks for a new stranger.

use futures_util::{SinkExt, StreamExt};
use randomly_server::infrastructure::dto::websocket::{ClientEvent, ServerMessage};
use randomly_shared::time::now_millis;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    domain::{Command, connect_url, parse_command},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
    view::ChatView,
};

/// How a session ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The partner left and the user asked for a new stranger
    FindNext,
    /// The user asked to exit (or closed stdin)
    Quit,
}

fn classify_connect_error(error: tungstenite::Error) -> ClientError {
    match &error {
        tungstenite::Error::Http(response) if response.status().as_u16() == 401 => {
            ClientError::Unauthorized
        }
        _ => ClientError::ConnectionError(error.to_string()),
    }
}

fn encode(event: &ClientEvent) -> Result<Message, ClientError> {
    serde_json::to_string(event)
        .map(|json| Message::Text(json.into()))
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Run one WebSocket client session
///
/// # Arguments
///
/// * `url` - WebSocket endpoint of the server
/// * `token` - Access token, when the server requires one
/// * `input_rx` - Lines typed by the user
pub async fn run_client_session(
    url: &str,
    token: Option<&str>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionEnd, ClientError> {
    let (ws_stream, _) = connect_async(connect_url(url, token))
        .await
        .map_err(classify_connect_error)?;
    tracing::info!("Connected to matchmaking server!");

    let (mut write, mut read) = ws_stream.split();
    write
        .send(encode(&ClientEvent::Joined)?)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let mut view = ChatView::new();
    print!("{}", MessageFormatter::format_status(view.status()));
    redisplay_prompt();

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let message = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(message) => message,
                        Err(e) => {
                            tracing::warn!("Ignored malformed frame from server: {}", e);
                            continue;
                        }
                    };
                    let change = view.apply(message, now_millis());
                    if !change.is_empty() {
                        print!("{}", MessageFormatter::format_change(&change));
                        if view.can_restart() {
                            print!("{}", MessageFormatter::format_hint(view.state()));
                        }
                        redisplay_prompt();
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::TransportClosed);
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                Some(Ok(_)) => {}
            },
            line = input_rx.recv() => {
                let Some(line) = line else {
                    let _ = write.close().await;
                    return Ok(SessionEnd::Quit);
                };

                match parse_command(&line) {
                    Command::Quit => {
                        let _ = write.close().await;
                        return Ok(SessionEnd::Quit);
                    }
                    Command::Next if view.can_restart() => {
                        let _ = write.close().await;
                        return Ok(SessionEnd::FindNext);
                    }
                    Command::Next => {
                        print!("{}", MessageFormatter::format_hint(view.state()));
                    }
                    Command::Say(text) => match view.compose(&text, now_millis()) {
                        Some((event, line)) => {
                            if let Err(e) = write.send(encode(&event)?).await {
                                tracing::warn!("Failed to send message: {}", e);
                                return Err(ClientError::ConnectionError(e.to_string()));
                            }
                            print!("{}", MessageFormatter::format_line(&line));
                        }
                        None if !view.input_enabled() => {
                            print!("{}", MessageFormatter::format_hint(view.state()));
                        }
                        None => {}
                    },
                }
                redisplay_prompt();
            }
        }
    }
}
