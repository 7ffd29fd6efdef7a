//! Tournament actor implementation with sequential command handling.

use super::{
    config::TournamentConfig,
    errors::{TournamentError, TournamentResult},
    messages::{Command, Event, GameEnded, GameStarted, TournamentEnded},
    models::{
        Lobby, Player, TournamentId, TournamentSnapshot, TournamentState, WaitingRoom,
        lobby_count,
    },
    notifier, pairing,
    scheduler::{self, Timers},
};
use crate::game::{GameId, GameSession, Move, MoveOutcome, Seat, Username};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot,
};

/// Tournament actor handle for sending commands
#[derive(Clone, Debug)]
pub struct TournamentHandle {
    sender: mpsc::Sender<Command>,
    tournament_id: TournamentId,
}

impl TournamentHandle {
    /// Create a new tournament handle
    pub fn new(sender: mpsc::Sender<Command>, tournament_id: TournamentId) -> Self {
        Self {
            sender,
            tournament_id,
        }
    }

    /// Get tournament ID
    pub fn tournament_id(&self) -> TournamentId {
        self.tournament_id
    }

    /// Whether the actor has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Enqueue a command, waiting for mailbox space
    pub async fn submit(&self, command: Command) -> TournamentResult<()> {
        self.sender
            .send(command)
            .await
            .map_err(|_| TournamentError::Closed(self.tournament_id))
    }

    /// Enqueue a command without waiting. A full mailbox drops the command.
    pub fn try_submit(&self, command: Command) -> TournamentResult<()> {
        match self.sender.try_send(command) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(command)) => {
                log::warn!(
                    "Tournament {}: mailbox full, dropping {} command",
                    self.tournament_id,
                    command.tag()
                );
                Err(TournamentError::Busy(self.tournament_id))
            }
            Err(TrySendError::Closed(_)) => Err(TournamentError::Closed(self.tournament_id)),
        }
    }

    /// Parse and enqueue a transport frame. Protocol errors are logged and
    /// the frame is dropped.
    pub async fn submit_wire(
        &self,
        username: Username,
        tag: &str,
        payload: Option<&str>,
    ) -> TournamentResult<()> {
        match Command::from_wire(username.clone(), tag, payload) {
            Ok(command) => self.submit(command).await,
            Err(e) => {
                log::warn!(
                    "Tournament {}: dropping command from {}: {}",
                    self.tournament_id,
                    username,
                    e
                );
                Ok(())
            }
        }
    }

    pub async fn join(
        &self,
        username: impl Into<Username>,
        outbound: mpsc::Sender<Event>,
    ) -> TournamentResult<()> {
        self.submit(Command::Join {
            username: username.into(),
            outbound,
        })
        .await
    }

    pub async fn leave(&self, username: impl Into<Username>) -> TournamentResult<()> {
        self.submit(Command::Leave {
            username: username.into(),
        })
        .await
    }

    pub async fn make_move(&self, username: impl Into<Username>, value: Move) -> TournamentResult<()> {
        self.submit(Command::Move {
            username: username.into(),
            value,
        })
        .await
    }

    pub async fn start_match(&self) -> TournamentResult<()> {
        self.submit(Command::StartMatch).await
    }

    pub async fn end_match(&self) -> TournamentResult<()> {
        self.submit(Command::EndMatch).await
    }

    /// Snapshot of the tournament, ordered after every command sent before it
    pub async fn state(&self) -> TournamentResult<TournamentSnapshot> {
        let (response, rx) = oneshot::channel();
        self.submit(Command::GetState { response }).await?;
        rx.await
            .map_err(|_| TournamentError::Closed(self.tournament_id))
    }
}

/// Tournament actor owning all state of a single tournament
pub struct TournamentActor {
    /// Tournament ID
    id: TournamentId,

    /// Scheduled start time
    start_at: DateTime<Utc>,

    /// Tournament configuration
    config: TournamentConfig,

    /// Lifecycle state
    state: TournamentState,

    /// Command inbox
    inbox: mpsc::Receiver<Command>,

    /// Sender handed to timers; weak so it never keeps the actor alive
    timer_sender: mpsc::WeakSender<Command>,

    /// Registered players
    waiting_room: WaitingRoom,

    /// One lobby per Swiss round
    lobbies: Vec<Lobby>,

    /// Index of the current lobby
    current_round: usize,

    /// Live game sessions of the current round
    games: HashMap<GameId, GameSession>,

    /// Username to live game routing
    participants: HashMap<Username, GameId>,

    /// Final winner
    winner: Option<Username>,

    /// Start-check and round ticker tasks
    timers: Timers,
}

impl TournamentActor {
    /// Create a new tournament actor
    ///
    /// # Arguments
    ///
    /// * `id` - Tournament ID
    /// * `start_at` - When the scheduler starts round 0
    /// * `config` - Tournament configuration
    ///
    /// # Returns
    ///
    /// * `(TournamentActor, TournamentHandle)` - Actor and handle for sending commands
    pub fn new(
        id: TournamentId,
        start_at: DateTime<Utc>,
        config: TournamentConfig,
    ) -> (Self, TournamentHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity.max(1));

        let actor = Self {
            id,
            start_at,
            config,
            state: TournamentState::Forming,
            inbox,
            timer_sender: sender.downgrade(),
            waiting_room: WaitingRoom::new(),
            lobbies: Vec::new(),
            current_round: 0,
            games: HashMap::new(),
            participants: HashMap::new(),
            winner: None,
            timers: Timers::default(),
        };

        let handle = TournamentHandle::new(sender, id);

        (actor, handle)
    }

    /// Create an actor and run it on the tokio runtime
    pub fn spawn(
        id: TournamentId,
        start_at: DateTime<Utc>,
        config: TournamentConfig,
    ) -> TournamentHandle {
        let (actor, handle) = Self::new(id, start_at, config);
        tokio::spawn(actor.run());
        handle
    }

    /// Run the tournament actor event loop until every handle is dropped
    pub async fn run(mut self) {
        log::info!(
            "Tournament {} forming, starts at {}",
            self.id,
            self.start_at
        );

        self.timers.arm_start_check(scheduler::spawn_start_check(
            self.id,
            self.timer_sender.clone(),
            self.start_at,
            self.config.start_check_interval,
        ));

        while let Some(command) = self.inbox.recv().await {
            self.handle_command(command);
        }

        self.timers.stop_all();
        log::info!("Tournament {} closed", self.id);
    }

    /// Handle one command. Never fails; protocol errors are logged.
    fn handle_command(&mut self, command: Command) {
        match (self.state, command) {
            (_, Command::GetState { response }) => {
                let _ = response.send(self.snapshot());
            }

            (TournamentState::Completed, command) => {
                log::debug!(
                    "Tournament {}: completed, ignoring {} command",
                    self.id,
                    command.tag()
                );
            }

            (TournamentState::Forming, Command::Join { username, outbound }) => {
                self.handle_join(username, outbound);
            }

            (TournamentState::Running, Command::Join { username, .. }) => {
                log::warn!(
                    "Tournament {}: {} tried to join after start",
                    self.id,
                    username
                );
            }

            (_, Command::Leave { username }) => self.handle_leave(&username),

            (TournamentState::Forming, Command::Move { username, .. }) => {
                log::debug!(
                    "Tournament {}: move from {} before start ignored",
                    self.id,
                    username
                );
            }

            (TournamentState::Running, Command::Move { username, value }) => {
                self.handle_move(&username, value);
            }

            (TournamentState::Forming, Command::StartMatch) => self.handle_start_match(),

            (TournamentState::Running, Command::StartMatch) => {
                log::debug!("Tournament {}: already started", self.id);
            }

            (TournamentState::Running, Command::EndMatch) => self.handle_end_match(),

            (TournamentState::Forming, Command::EndMatch) => {
                log::debug!("Tournament {}: end of round before start ignored", self.id);
            }
        }
    }

    fn handle_join(&mut self, username: Username, outbound: mpsc::Sender<Event>) {
        if self
            .waiting_room
            .join(Player::new(username.clone(), outbound))
        {
            log::info!(
                "Tournament {}: {} joined ({} registered)",
                self.id,
                username,
                self.waiting_room.len()
            );
        } else {
            log::debug!("Tournament {}: {} already registered", self.id, username);
        }
    }

    fn handle_leave(&mut self, username: &Username) {
        if self.waiting_room.leave(username).is_none() {
            log::debug!("Tournament {}: {} is not registered", self.id, username);
            return;
        }
        log::info!("Tournament {}: {} left", self.id, username);

        let Some(game_id) = self.participants.remove(username) else {
            return;
        };
        let Some(session) = self.games.get_mut(&game_id) else {
            log::error!(
                "Tournament {}: game {} for {} is missing",
                self.id,
                game_id,
                username
            );
            return;
        };

        if let Some(seat) = session.forfeit(username)
            && let Some(opponent) = session.player(seat)
        {
            log::info!(
                "Tournament {}: {} forfeits game {} to {}",
                self.id,
                username,
                game_id,
                opponent
            );
            notifier::notify_user(
                &self.waiting_room,
                opponent,
                Event::GameWon(session.latest_snapshot()),
            );
        }
    }

    fn handle_start_match(&mut self) {
        let player_count = self.waiting_room.len();
        let rounds = lobby_count(player_count);

        self.lobbies = (0..rounds).map(Lobby::new).collect();
        self.current_round = 0;
        self.lobbies[0] =
            Lobby::from_standings(0, self.waiting_room.iter(), self.config.shuffle_pairings);
        self.state = TournamentState::Running;
        self.timers.stop_start_check();

        log::info!(
            "Tournament {} started with {} players over {} rounds",
            self.id,
            player_count,
            rounds
        );

        self.open_round();

        self.timers.arm_round_ticker(scheduler::spawn_round_ticker(
            self.id,
            self.timer_sender.clone(),
            self.config.round_duration,
        ));
    }

    /// Pair the current lobby, replace the live games and announce them
    fn open_round(&mut self) {
        let Some(lobby) = self.lobbies.get(self.current_round) else {
            log::error!(
                "Tournament {}: lobby {} does not exist",
                self.id,
                self.current_round
            );
            return;
        };

        let sessions = pairing::pair_lobby(lobby);
        self.games.clear();
        self.participants.clear();
        for session in sessions {
            for username in session.participants() {
                self.participants.insert(username.clone(), session.id());
            }
            self.games.insert(session.id(), session);
        }

        for session in self.games.values() {
            for username in session.participants() {
                notifier::notify_user(
                    &self.waiting_room,
                    username,
                    Event::GameStarted(GameStarted {
                        game_id: session.id(),
                        round: self.current_round,
                        opponent: session.opponent_of(username).cloned(),
                    }),
                );
            }
        }

        log::info!(
            "Tournament {}: round {} opened with {} games",
            self.id,
            self.current_round,
            self.games.len()
        );
    }

    fn handle_move(&mut self, username: &Username, value: Move) {
        let Some(game_id) = self.participants.get(username).copied() else {
            log::warn!(
                "Tournament {}: move from {} with no live game",
                self.id,
                username
            );
            return;
        };
        let Some(session) = self.games.get_mut(&game_id) else {
            log::error!(
                "Tournament {}: game {} for {} is missing, dropping route",
                self.id,
                game_id,
                username
            );
            self.participants.remove(username);
            return;
        };

        let outcome = match session.submit_move(username, value) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!(
                    "Tournament {}: move from {} rejected: {}",
                    self.id,
                    username,
                    e
                );
                return;
            }
        };

        let room = &self.waiting_room;
        match outcome {
            MoveOutcome::Pending(round) => {
                notifier::notify_user(room, username, Event::MoveAccepted(round));
            }
            MoveOutcome::RoundResolved(round) => {
                for player in session.participants() {
                    notifier::notify_user(room, player, Event::MoveAccepted(round.clone()));
                }
            }
            MoveOutcome::Won { winner, round } => {
                log::info!(
                    "Tournament {}: game {} won by {}",
                    self.id,
                    game_id,
                    session.player(winner).map_or("?", Username::as_str)
                );
                for seat in [Seat::One, Seat::Two] {
                    if let Some(player) = session.player(seat) {
                        let event = if seat == winner {
                            Event::GameWon(round.clone())
                        } else {
                            Event::GameLost(round.clone())
                        };
                        notifier::notify_user(room, player, event);
                    }
                }
            }
            MoveOutcome::Drawn(round) => {
                log::info!("Tournament {}: game {} drawn", self.id, game_id);
                for player in session.participants() {
                    notifier::notify_user(room, player, Event::GameDraw(round.clone()));
                }
            }
        }
    }

    fn handle_end_match(&mut self) {
        let round = self.current_round;
        log::info!("Tournament {}: closing round {}", self.id, round);

        for session in self.games.values_mut() {
            let winner = session.resolve_for_round_end();
            if let Some(name) = &winner {
                match self.waiting_room.get_mut(name) {
                    Some(player) => player.win_count += 1,
                    None => log::debug!(
                        "Tournament {}: winner {} has left, no win recorded",
                        self.id,
                        name
                    ),
                }
            }

            let ended = GameEnded {
                game_id: session.id(),
                round,
                winner,
            };
            for username in session.participants() {
                notifier::notify_user(
                    &self.waiting_room,
                    username,
                    Event::GameEnded(ended.clone()),
                );
            }
        }

        self.current_round += 1;
        if self.current_round >= self.lobbies.len() {
            self.finish();
            return;
        }

        self.lobbies[self.current_round] = Lobby::from_standings(
            self.current_round,
            self.waiting_room.iter(),
            self.config.shuffle_pairings,
        );
        self.open_round();
    }

    fn finish(&mut self) {
        self.winner = self
            .waiting_room
            .champion()
            .map(|player| player.username.clone());
        self.state = TournamentState::Completed;
        self.games.clear();
        self.participants.clear();
        self.timers.stop_all();

        match &self.winner {
            Some(winner) => log::info!("Tournament {} ended, winner {}", self.id, winner),
            None => log::info!("Tournament {} ended without a winner", self.id),
        }

        notifier::broadcast(
            &self.waiting_room,
            &Event::TournamentEnded(TournamentEnded {
                tournament_id: self.id,
                winner: self.winner.clone(),
            }),
        );
    }

    fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            id: self.id,
            state: self.state,
            round: self.current_round,
            lobby_count: self.lobbies.len(),
            live_games: self.games.len(),
            players: self.waiting_room.standings(),
            winner: self.winner.clone(),
        }
    }
}
