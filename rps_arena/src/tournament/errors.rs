//! Error types for the tournament module

use super::models::TournamentId;
use crate::game::GameError;
use thiserror::Error;

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Actor has stopped and its mailbox is gone
    #[error("Tournament {0} is closed")]
    Closed(TournamentId),

    /// Mailbox is full and the command was dropped
    #[error("Tournament {0} is busy, command dropped")]
    Busy(TournamentId),

    /// Transport sent a command tag the actor does not understand
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command tag requires a payload
    #[error("Command {0} requires a payload")]
    MissingPayload(&'static str),

    /// Game-level rejection
    #[error(transparent)]
    Game(#[from] GameError),

    /// Configuration error
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
