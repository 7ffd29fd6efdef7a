//! Hand moves, seats and the round-resolution rule.

use super::errors::GameError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the three legal hand moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Every legal move, in declaration order
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Whether `self` beats `other`
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Scissors, Move::Paper)
                | (Move::Paper, Move::Rock)
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Rock => write!(f, "rock"),
            Move::Paper => write!(f, "paper"),
            Move::Scissors => write!(f, "scissors"),
        }
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            other => Err(GameError::InvalidMove(other.to_string())),
        }
    }
}

/// Side of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// The even-index player of a pairing
    One,
    /// The odd-index player, absent on a bye
    Two,
}

impl Seat {
    /// The opposing seat
    pub fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Numeric code used in round payloads (1 or 2)
    pub fn code(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }
}

/// Resolve a single round. `None` is a draw.
pub fn resolve(player1: Move, player2: Move) -> Option<Seat> {
    if player1 == player2 {
        None
    } else if player1.beats(player2) {
        Some(Seat::One)
    } else {
        Some(Seat::Two)
    }
}

/// Round winner as a numeric code: 0 draw, 1 player one, 2 player two
pub fn winner_code(player1: Move, player2: Move) -> u8 {
    resolve(player1, player2).map_or(0, Seat::code)
}
