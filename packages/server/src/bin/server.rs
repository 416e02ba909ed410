//! Randomly matchmaking server.
//!
//! Pairs anonymous WebSocket clients two at a time and relays their messages.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin randomly-server
//! cargo run --bin randomly-server -- --host 0.0.0.0 --port 3000 --access-token secret
//! ```

use std::sync::Arc;

use clap::Parser;
use randomly_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryLobbyRepository},
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DEFAULT_WELCOME_MESSAGE, DisconnectParticipantUseCase,
        GetLobbyStateUseCase, JoinMatchUseCase, SendMessageUseCase,
    },
};
use randomly_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "randomly-server")]
#[command(about = "Anonymous one-to-one stranger chat matchmaking server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Token clients must present as `?token=` (open access when omitted)
    #[arg(long)]
    access_token: Option<String>,

    /// Message sent with `welcome` when a pairing forms
    #[arg(long, default_value = DEFAULT_WELCOME_MESSAGE)]
    welcome_message: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory waiting pool and session registry)
    let repository = Arc::new(InMemoryLobbyRepository::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create UseCases
    let clock = Arc::new(SystemClock);
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        message_pusher.clone(),
        clock.clone(),
    ));
    let join_match_usecase = Arc::new(JoinMatchUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
        args.welcome_message,
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock,
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher,
    ));
    let get_lobby_state_usecase = Arc::new(GetLobbyStateUseCase::new(repository));

    if args.access_token.is_some() {
        tracing::info!("Access token required for WebSocket connections");
    }

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        join_match_usecase,
        send_message_usecase,
        disconnect_participant_usecase,
        get_lobby_state_usecase,
    )
    .with_access_token(args.access_token);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
