//! Best-of-five game sessions.
//!
//! A [`GameSession`] pairs two players (or one player on a bye) and
//! resolves up to [`session::ROUNDS_PER_GAME`] rounds of rock-paper-scissors.
//! The first side to [`session::WINS_REQUIRED`] round wins takes the game.

pub mod entities;
pub mod errors;
pub mod moves;
pub mod session;

pub use entities::{GameId, Username};
pub use errors::GameError;
pub use moves::{Move, Seat};
pub use session::{GameSession, MoveOutcome, Round, RoundSnapshot, SessionOutcome, Standings};
