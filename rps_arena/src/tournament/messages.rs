//! Tournament actor message types.

use super::{
    errors::TournamentError,
    models::{TournamentId, TournamentSnapshot},
};
use crate::game::{GameId, Move, RoundSnapshot, Username};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

/// Messages that can be sent to a TournamentActor
#[derive(Debug)]
pub enum Command {
    /// Register for the tournament
    Join {
        username: Username,
        outbound: mpsc::Sender<Event>,
    },

    /// Withdraw from the tournament
    Leave { username: Username },

    /// Play a move in the current game
    Move { username: Username, value: Move },

    /// Begin round 0 (scheduler or operator)
    StartMatch,

    /// Internal: close the current round (round ticker)
    EndMatch,

    /// Get current tournament state
    GetState {
        response: oneshot::Sender<TournamentSnapshot>,
    },
}

impl Command {
    /// Short tag for logging
    pub fn tag(&self) -> &'static str {
        match self {
            Command::Join { .. } => "join",
            Command::Leave { .. } => "leave",
            Command::Move { .. } => "move",
            Command::StartMatch => "startMatch",
            Command::EndMatch => "endMatch",
            Command::GetState { .. } => "getState",
        }
    }

    /// Build a command from a transport frame.
    ///
    /// `join` needs an outbound channel and cannot come off the wire; the
    /// transport registers players with [`Command::Join`] directly.
    pub fn from_wire(
        username: Username,
        tag: &str,
        payload: Option<&str>,
    ) -> Result<Self, TournamentError> {
        match tag {
            "leave" => Ok(Command::Leave { username }),
            "move" => {
                let raw = payload.ok_or(TournamentError::MissingPayload("move"))?;
                let value = raw.parse::<Move>()?;
                Ok(Command::Move { username, value })
            }
            "startMatch" => Ok(Command::StartMatch),
            "endMatch" => Ok(Command::EndMatch),
            other => Err(TournamentError::UnknownCommand(other.to_string())),
        }
    }
}

/// Payload of [`Event::GameStarted`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStarted {
    pub game_id: GameId,
    /// Lobby index
    pub round: usize,
    /// `None` on a bye
    pub opponent: Option<Username>,
}

/// Payload of [`Event::GameEnded`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameEnded {
    pub game_id: GameId,
    pub round: usize,
    pub winner: Option<Username>,
}

/// Payload of [`Event::TournamentEnded`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentEnded {
    pub tournament_id: TournamentId,
    pub winner: Option<Username>,
}

/// Events pushed to a player's outbound channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "payload", rename_all = "camelCase")]
pub enum Event {
    GameStarted(GameStarted),
    MoveAccepted(RoundSnapshot),
    GameWon(RoundSnapshot),
    GameLost(RoundSnapshot),
    GameDraw(RoundSnapshot),
    GameEnded(GameEnded),
    TournamentEnded(TournamentEnded),
}

impl Event {
    /// Wire tag of the event
    pub fn name(&self) -> &'static str {
        match self {
            Event::GameStarted(_) => "gameStarted",
            Event::MoveAccepted(_) => "moveAccepted",
            Event::GameWon(_) => "gameWon",
            Event::GameLost(_) => "gameLost",
            Event::GameDraw(_) => "gameDraw",
            Event::GameEnded(_) => "gameEnded",
            Event::TournamentEnded(_) => "tournamentEnded",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
