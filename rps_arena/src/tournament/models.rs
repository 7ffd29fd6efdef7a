//! Tournament data models: players, waiting room, lobbies, snapshots.

use super::messages::Event;
use crate::game::Username;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, btree_map};
use tokio::sync::mpsc;

/// Tournament ID type
pub type TournamentId = i64;

/// Tournament lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentState {
    /// Accepting registrations
    Forming,
    /// Rounds in progress
    Running,
    /// Winner decided
    Completed,
}

impl std::fmt::Display for TournamentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentState::Forming => write!(f, "forming"),
            TournamentState::Running => write!(f, "running"),
            TournamentState::Completed => write!(f, "completed"),
        }
    }
}

/// Registered participant.
///
/// The outbound sender belongs to the player's connection; the tournament
/// only writes to it.
#[derive(Debug, Clone)]
pub struct Player {
    pub username: Username,
    pub outbound: mpsc::Sender<Event>,
    /// Game sessions won across all rounds
    pub win_count: u32,
}

impl Player {
    pub fn new(username: Username, outbound: mpsc::Sender<Event>) -> Self {
        Self {
            username,
            outbound,
            win_count: 0,
        }
    }
}

/// Registered players keyed by username, iterated in username order
#[derive(Debug, Default)]
pub struct WaitingRoom {
    players: BTreeMap<Username, Player>,
}

impl WaitingRoom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player. The first registration of a username wins; returns
    /// `false` for a duplicate.
    pub fn join(&mut self, player: Player) -> bool {
        match self.players.entry(player.username.clone()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(player);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn leave(&mut self, username: &Username) -> Option<Player> {
        self.players.remove(username)
    }

    pub fn get(&self, username: &Username) -> Option<&Player> {
        self.players.get(username)
    }

    pub fn get_mut(&mut self, username: &Username) -> Option<&mut Player> {
        self.players.get_mut(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.players.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Player with the most wins. Equal counts go to the smallest username;
    /// a player needs at least one win.
    pub fn champion(&self) -> Option<&Player> {
        self.players
            .values()
            .filter(|player| player.win_count > 0)
            .fold(None, |best: Option<&Player>, player| match best {
                Some(current) if current.win_count >= player.win_count => Some(current),
                _ => Some(player),
            })
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .values()
            .map(|player| Standing {
                username: player.username.clone(),
                wins: player.win_count,
            })
            .collect()
    }
}

/// One Swiss round: players grouped into buckets by win count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lobby {
    pub round: usize,
    pub buckets: BTreeMap<u32, Vec<Username>>,
}

impl Lobby {
    pub fn new(round: usize) -> Self {
        Self {
            round,
            buckets: BTreeMap::new(),
        }
    }

    /// Group players by their current win count. With `shuffle`, the order
    /// inside each bucket is randomized.
    pub fn from_standings<'a>(
        round: usize,
        players: impl IntoIterator<Item = &'a Player>,
        shuffle: bool,
    ) -> Self {
        let mut lobby = Self::new(round);
        for player in players {
            lobby
                .buckets
                .entry(player.win_count)
                .or_default()
                .push(player.username.clone());
        }
        if shuffle {
            let mut rng = rand::rng();
            for bucket in lobby.buckets.values_mut() {
                bucket.shuffle(&mut rng);
            }
        }
        lobby
    }

    pub fn player_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Win count of one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub username: Username,
    pub wins: u32,
}

/// Point-in-time view of a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TournamentSnapshot {
    pub id: TournamentId,
    pub state: TournamentState,
    /// Index of the current lobby
    pub round: usize,
    pub lobby_count: usize,
    pub live_games: usize,
    pub players: Vec<Standing>,
    pub winner: Option<Username>,
}

/// Number of Swiss rounds for `player_count` players: `ceil(log2(n))`,
/// at least one.
pub fn lobby_count(player_count: usize) -> usize {
    if player_count <= 2 {
        1
    } else {
        (player_count - 1).ilog2() as usize + 1
    }
}
