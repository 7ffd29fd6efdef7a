//! Structured logging configuration.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels come from `RUST_LOG` (default `info`). Records emitted through
/// the `log` facade by the tournament library are forwarded to the same
/// subscriber.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log an event relayed to a player's connection
pub fn log_relayed_event(username: &str, payload: &str) {
    tracing::info!(player = username, event = payload, "Relayed event");
}

/// Log the final result of a tournament
pub fn log_tournament_result(tournament_id: i64, winner: Option<&str>, elapsed_ms: u64) {
    match winner {
        Some(winner) => tracing::info!(
            tournament_id = tournament_id,
            winner = winner,
            elapsed_ms = elapsed_ms,
            "Tournament finished"
        ),
        None => tracing::warn!(
            tournament_id = tournament_id,
            elapsed_ms = elapsed_ms,
            "Tournament finished without a winner"
        ),
    }
}
