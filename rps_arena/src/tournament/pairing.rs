//! Swiss-style pairing within win-count buckets.

use super::models::Lobby;
use crate::game::{GameSession, Username};

/// Pair players by position: each even index opens a session as player one
/// and the next player joins it as player two. An odd player out gets a bye.
pub fn pair_bucket(players: &[Username]) -> Vec<GameSession> {
    players
        .chunks(2)
        .map(|pair| GameSession::new(pair[0].clone(), pair.get(1).cloned()))
        .collect()
}

/// Pair every bucket of a lobby, highest win count first. Players never
/// meet someone from another bucket.
pub fn pair_lobby(lobby: &Lobby) -> Vec<GameSession> {
    lobby
        .buckets
        .iter()
        .rev()
        .flat_map(|(wins, players)| {
            let sessions = pair_bucket(players);
            log::debug!(
                "Round {}: bucket {} paired {} players into {} games",
                lobby.round,
                wins,
                players.len(),
                sessions.len()
            );
            sessions
        })
        .collect()
}
