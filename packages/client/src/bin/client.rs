//! Terminal client for Randomly.
//!
//! Connects to the matchmaking server, waits for a stranger and relays stdin
//! lines to them. `/next` finds a new stranger after the partner left and
//! `/quit` exits. Automatically reconnects on disconnection (max 5 attempts
//! with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin randomly-client
//! cargo run --bin randomly-client -- --url ws://127.0.0.1:8080/ws --token secret
//! ```

use clap::Parser;

use randomly_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "randomly-client")]
#[command(about = "Terminal client for anonymous one-to-one stranger chat", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Access token, when the server requires one
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = randomly_client::run_client(args.url, args.token).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
