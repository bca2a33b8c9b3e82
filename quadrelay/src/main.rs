//! `quadrelay` — two-player turn-based game relay server.
//!
//! Accepts TCP connections, brokers them into 4-digit-coded rooms, and
//! relays rotated 2x2 board state between the two peers until one
//! disconnects. See `quadrelay_wire` for the wire protocol and
//! `quadrelay::room` for the per-match state machine.

use quadrelay::config::ServerConfig;

#[compio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env();

    if let Err(error) = quadrelay::server::run(config).await {
        tracing::error!(%error, "fatal error, shutting down");
        std::process::exit(1);
    }
}
