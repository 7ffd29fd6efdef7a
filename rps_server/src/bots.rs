//! Bot players that stand in for remote connections.
//!
//! Each bot owns the receiving end of its outbound channel, relays every
//! event to the log as JSON and answers with random moves.

use crate::logging;
use rand::Rng;
use rps_arena::{Event, Move, TournamentHandle, Username};
use tokio::sync::mpsc;

/// Pick a move uniformly at random
pub fn random_move() -> Move {
    let index = rand::rng().random_range(0..Move::ALL.len());
    Move::ALL[index]
}

/// Whether the bot should play after receiving `event`
pub fn wants_to_move(event: &Event) -> bool {
    match event {
        Event::GameStarted(game) => game.opponent.is_some(),
        Event::MoveAccepted(round) => round.is_complete(),
        _ => false,
    }
}

/// Play until the tournament ends.
///
/// # Returns
///
/// * `Option<Username>` - Champion announced to this bot, if any
pub async fn run_bot(
    handle: TournamentHandle,
    username: Username,
    mut events: mpsc::Receiver<Event>,
) -> Option<Username> {
    while let Some(event) = events.recv().await {
        match event.to_json() {
            Ok(json) => logging::log_relayed_event(username.as_str(), &json),
            Err(e) => log::warn!("Failed to serialize {} event: {}", event.name(), e),
        }

        if let Event::TournamentEnded(ended) = event {
            return ended.winner;
        }

        if wants_to_move(&event)
            && let Err(e) = handle.make_move(username.clone(), random_move()).await
        {
            log::warn!("Bot {} could not move: {}", username, e);
            return None;
        }
    }
    None
}
