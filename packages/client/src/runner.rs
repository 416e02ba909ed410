//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::{SessionEnd, run_client_session},
    ui::spawn_input_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the terminal client with reconnection logic
///
/// Every session uses a brand-new connection, so both `/next` and a
/// reconnection start over in `Searching` with a fresh identity.
pub async fn run_client(url: String, token: Option<String>) -> Result<(), ClientError> {
    let mut input_rx = spawn_input_reader();
    let mut reconnect_count = 0;

    println!("\nType messages and press Enter to send. Type /quit to exit.\n");

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            url,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, token.as_deref(), &mut input_rx).await {
            Ok(SessionEnd::Quit) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Ok(SessionEnd::FindNext) => {
                tracing::info!("Looking for a new stranger");
                reconnect_count = 0;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}. Exiting.", e);
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
