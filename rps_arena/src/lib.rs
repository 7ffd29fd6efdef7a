//! # RPS Arena
//!
//! Swiss-style elimination tournaments of best-of-five rock-paper-scissors,
//! run by one async actor per tournament.
//!
//! ## Architecture
//!
//! A tournament moves through three states:
//!
//! - **Forming**: players join and leave the waiting room
//! - **Running**: one lobby per Swiss round; players are bucketed by win
//!   count and paired inside their bucket, an odd player out gets a bye
//! - **Completed**: the player with the most wins is champion
//!
//! A scheduler starts the tournament once its start time passes, and a
//! ticker closes each round after a fixed interval.
//!
//! ## Core Modules
//!
//! - [`game`]: moves, rounds and best-of-five game sessions
//! - [`tournament`]: the actor, pairing, scheduling and event delivery
//!
//! ## Example
//!
//! ```
//! use rps_arena::game::{GameSession, Move, MoveOutcome, Username};
//!
//! let alice = Username::from("alice");
//! let bob = Username::from("bob");
//! let mut game = GameSession::new(alice.clone(), Some(bob.clone()));
//!
//! game.submit_move(&alice, Move::Rock).unwrap();
//! let outcome = game.submit_move(&bob, Move::Scissors).unwrap();
//! assert!(matches!(outcome, MoveOutcome::RoundResolved(round) if round.winner == 1));
//! ```

/// Game sessions and round resolution.
pub mod game;
pub use game::{GameError, GameSession, Move, Username};

/// Tournament actor, pairing, scheduling and notification.
pub mod tournament;
pub use tournament::{
    Command, Event, TournamentConfig, TournamentError, TournamentHandle, TournamentManager,
};
