//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Departure, PairingOutcome},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    if !state.is_authorized(query.token.as_deref()) {
        tracing::warn!("Rejected WebSocket connection with an invalid access token");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state)))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// The channel is the connection's only writer, so frames leave in push order.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();
    let connected = state.connect_participant_usecase.execute(tx).await;
    let connection_id = connected.connection_id;
    tracing::info!("Connection '{}' opened", connection_id);

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_frame(&state_clone, &connection_id_clone, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        Departure::LeftSession { session_id, .. } => tracing::info!(
            "Connection '{}' closed and left session '{}'",
            connection_id,
            session_id
        ),
        Departure::SessionReleased(session_id) => tracing::info!(
            "Connection '{}' closed and released session '{}'",
            connection_id,
            session_id
        ),
        Departure::LeftPool => {
            tracing::info!("Connection '{}' closed while waiting", connection_id)
        }
        Departure::Unknown => tracing::info!("Connection '{}' closed", connection_id),
    }
}

/// Dispatches one text frame from a client.
///
/// Malformed frames and rejected events are logged and dropped; the connection stays open.
async fn handle_client_frame(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignored malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        ClientEvent::Joined => match state.join_match_usecase.execute(connection_id).await {
            Ok(PairingOutcome::Waiting) => {}
            Ok(PairingOutcome::Paired { session, .. }) => {
                tracing::debug!("Connection '{}' paired in '{}'", connection_id, session.id)
            }
            Err(e) => tracing::warn!("Ignored joined from '{}': {}", connection_id, e),
        },
        ClientEvent::Message { message, id } => {
            if !id.is_empty() && id != connection_id.as_str() {
                tracing::warn!(
                    "Connection '{}' claimed id '{}'; attributing by connection",
                    connection_id,
                    id
                );
            }
            match state
                .send_message_usecase
                .execute(connection_id, &message)
                .await
            {
                Ok(delivery) => tracing::debug!(
                    "Relayed message from '{}' to '{}'",
                    connection_id,
                    delivery.recipient
                ),
                Err(e) => tracing::warn!("Dropped message from '{}': {}", connection_id, e),
            }
        }
    }
}
