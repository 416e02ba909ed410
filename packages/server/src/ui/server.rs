//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetLobbyStateUseCase,
    JoinMatchUseCase, SendMessageUseCase,
};

use super::{
    handler::{debug_lobby_state, get_stats, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket matchmaking server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     join_match_usecase,
///     send_message_usecase,
///     disconnect_participant_usecase,
///     get_lobby_state_usecase,
/// )
/// .with_access_token(Some("secret".to_string()));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_participant_usecase` - UseCase for accepting connections
    /// * `join_match_usecase` - UseCase for entering the waiting pool and pairing
    /// * `send_message_usecase` - UseCase for relaying messages to the partner
    /// * `disconnect_participant_usecase` - UseCase for connection teardown
    /// * `get_lobby_state_usecase` - UseCase for reading the lobby state
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        join_match_usecase: Arc<JoinMatchUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        get_lobby_state_usecase: Arc<GetLobbyStateUseCase>,
    ) -> Self {
        Self {
            state: AppState {
                connect_participant_usecase,
                join_match_usecase,
                send_message_usecase,
                disconnect_participant_usecase,
                get_lobby_state_usecase,
                access_token: None,
            },
        }
    }

    /// Require `?token=<token>` on `/ws` when `Some`.
    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.state.access_token = access_token;
        self
    }

    /// Build the router with every endpoint.
    pub fn router(self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/stats", get(get_stats))
            .route("/debug/lobby", get(debug_lobby_state))
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::new(self.state))
    }

    /// Run the server on an already bound listener until a shutdown signal arrives.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!(
            "Matchmaking server listening on {}",
            listener.local_addr()?
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Run the matchmaking server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }
}
