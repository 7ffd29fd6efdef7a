//! Tournament module providing Swiss-style tournaments with an async actor model.
//!
//! This module implements:
//! - TournamentActor: sole owner of one tournament's state, fed by an mpsc mailbox
//! - TournamentManager: registry that spawns an actor per tournament id
//! - Swiss pairing of players grouped by win count
//! - Start-time scheduler and end-of-round ticker
//! - Non-blocking event delivery to each player's outbound channel
//!
//! ## Architecture
//!
//! Each tournament runs in its own Tokio task and processes [`Command`]s one
//! at a time in arrival order. No other code touches tournament state, so
//! nothing is locked. Results are pushed to players as [`Event`]s.
//!
//! ## Example
//!
//! ```no_run
//! use rps_arena::tournament::{TournamentConfig, TournamentManager};
//! use rps_arena::game::Move;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = TournamentManager::new(TournamentConfig::default())?;
//!     let start_at = chrono::Utc::now() + chrono::Duration::seconds(30);
//!     let tournament = manager.get_or_create(1, start_at).await;
//!
//!     let (tx, mut events) = mpsc::channel(32);
//!     tournament.join("alice", tx).await?;
//!
//!     while let Some(event) = events.recv().await {
//!         println!("{}", event.to_json()?);
//!         tournament.make_move("alice", Move::Rock).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod manager;
pub mod messages;
pub mod models;
pub mod notifier;
pub mod pairing;
pub mod scheduler;

pub use actor::{TournamentActor, TournamentHandle};
pub use config::TournamentConfig;
pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use messages::{Command, Event, GameEnded, GameStarted, TournamentEnded};
pub use models::{
    Lobby, Player, Standing, TournamentId, TournamentSnapshot, TournamentState, WaitingRoom,
};
