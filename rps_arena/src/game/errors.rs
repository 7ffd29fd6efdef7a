//! Error types for game sessions

use super::entities::Username;
use thiserror::Error;

/// Reasons a move is refused by a game session
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// Not one of rock, paper, scissors
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// Username is not seated in this session
    #[error("Player {0} is not part of this game")]
    NotInGame(Username),

    /// Session already has a result
    #[error("Game is already finished")]
    GameFinished,

    /// Bye sessions have nobody to play against
    #[error("Player {0} has a bye this round")]
    NoOpponent(Username),

    /// Player has already moved in every round
    #[error("Player {0} has no rounds left to play")]
    RoundsExhausted(Username),
}
