//! Game session state and best-of-five resolution.

use super::{
    entities::{GameId, Username},
    errors::GameError,
    moves::{self, Move, Seat},
};
use serde::Serialize;
use uuid::Uuid;

/// Rounds played in one game session
pub const ROUNDS_PER_GAME: usize = 5;

/// Round wins that decide a game before all rounds are played
pub const WINS_REQUIRED: usize = 3;

/// One round of a game session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Round {
    pub player1_move: Option<Move>,
    pub player2_move: Option<Move>,
    /// Set once both moves are in; `None` is a draw or a pending round
    pub winner: Option<Seat>,
}

impl Round {
    pub fn move_of(&self, seat: Seat) -> Option<Move> {
        match seat {
            Seat::One => self.player1_move,
            Seat::Two => self.player2_move,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.player1_move.is_some() && self.player2_move.is_some()
    }

    fn set_move(&mut self, seat: Seat, mv: Move) {
        match seat {
            Seat::One => self.player1_move = Some(mv),
            Seat::Two => self.player2_move = Some(mv),
        }
    }

    fn settle(&mut self) {
        if let (Some(p1), Some(p2)) = (self.player1_move, self.player2_move) {
            self.winner = moves::resolve(p1, p2);
        }
    }
}

/// Round state as delivered to players
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSnapshot {
    pub game_id: GameId,
    /// Zero-based round number inside the game
    pub index: usize,
    pub player1_move: Option<Move>,
    pub player2_move: Option<Move>,
    /// 0 draw or pending, 1 player one, 2 player two
    pub winner: u8,
}

impl RoundSnapshot {
    pub fn is_complete(&self) -> bool {
        self.player1_move.is_some() && self.player2_move.is_some()
    }
}

/// Final result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    Winner(Seat),
    Draw,
}

/// Round tallies for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Standings {
    pub player1_wins: usize,
    pub player2_wins: usize,
    pub draws: usize,
}

impl Standings {
    /// Seat with strictly more round wins
    pub fn leader(&self) -> Option<Seat> {
        if self.player1_wins > self.player2_wins {
            Some(Seat::One)
        } else if self.player2_wins > self.player1_wins {
            Some(Seat::Two)
        } else {
            None
        }
    }
}

/// What an accepted move did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Waiting on the opponent's move for this round
    Pending(RoundSnapshot),
    /// Round settled, game continues
    RoundResolved(RoundSnapshot),
    /// Game decided
    Won { winner: Seat, round: RoundSnapshot },
    /// All rounds played with equal wins
    Drawn(RoundSnapshot),
}

/// A best-of-five match between two players, or a bye for one
#[derive(Debug, Clone)]
pub struct GameSession {
    id: GameId,
    player1: Username,
    player2: Option<Username>,
    rounds: [Round; ROUNDS_PER_GAME],
    outcome: Option<SessionOutcome>,
}

impl GameSession {
    /// Create a session with a fresh random id. `player2 == None` is a bye.
    pub fn new(player1: Username, player2: Option<Username>) -> Self {
        Self {
            id: Uuid::new_v4(),
            player1,
            player2,
            rounds: [Round::default(); ROUNDS_PER_GAME],
            outcome: None,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn player1(&self) -> &Username {
        &self.player1
    }

    pub fn player2(&self) -> Option<&Username> {
        self.player2.as_ref()
    }

    pub fn player(&self, seat: Seat) -> Option<&Username> {
        match seat {
            Seat::One => Some(&self.player1),
            Seat::Two => self.player2.as_ref(),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.player2.is_none()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Username of the decided winner, if any
    pub fn winner(&self) -> Option<&Username> {
        match self.outcome {
            Some(SessionOutcome::Winner(seat)) => self.player(seat),
            _ => None,
        }
    }

    /// Every seated username
    pub fn participants(&self) -> impl Iterator<Item = &Username> {
        std::iter::once(&self.player1).chain(self.player2.iter())
    }

    pub fn seat_of(&self, username: &Username) -> Option<Seat> {
        if &self.player1 == username {
            Some(Seat::One)
        } else if self.player2.as_ref() == Some(username) {
            Some(Seat::Two)
        } else {
            None
        }
    }

    /// The opponent of `username`, if both are seated
    pub fn opponent_of(&self, username: &Username) -> Option<&Username> {
        self.seat_of(username)
            .and_then(|seat| self.player(seat.other()))
    }

    pub fn standings(&self) -> Standings {
        self.rounds
            .iter()
            .filter(|round| round.is_complete())
            .fold(Standings::default(), |mut acc, round| {
                match round.winner {
                    Some(Seat::One) => acc.player1_wins += 1,
                    Some(Seat::Two) => acc.player2_wins += 1,
                    None => acc.draws += 1,
                }
                acc
            })
    }

    pub fn snapshot(&self, index: usize) -> RoundSnapshot {
        let round = self.rounds.get(index).copied().unwrap_or_default();
        RoundSnapshot {
            game_id: self.id,
            index,
            player1_move: round.player1_move,
            player2_move: round.player2_move,
            winner: round.winner.map_or(0, Seat::code),
        }
    }

    /// Snapshot of the most recent round anyone has moved in
    pub fn latest_snapshot(&self) -> RoundSnapshot {
        let index = self
            .rounds
            .iter()
            .rposition(|round| round.player1_move.is_some() || round.player2_move.is_some())
            .unwrap_or(0);
        self.snapshot(index)
    }

    /// Record a move for `username` in the first round they have not played.
    pub fn submit_move(&mut self, username: &Username, mv: Move) -> Result<MoveOutcome, GameError> {
        let seat = self
            .seat_of(username)
            .ok_or_else(|| GameError::NotInGame(username.clone()))?;

        if self.outcome.is_some() {
            return Err(GameError::GameFinished);
        }
        if self.player2.is_none() {
            return Err(GameError::NoOpponent(username.clone()));
        }

        let index = self
            .rounds
            .iter()
            .position(|round| round.move_of(seat).is_none())
            .ok_or_else(|| GameError::RoundsExhausted(username.clone()))?;

        let round = &mut self.rounds[index];
        round.set_move(seat, mv);
        if !round.is_complete() {
            return Ok(MoveOutcome::Pending(self.snapshot(index)));
        }
        round.settle();

        // A seat can only reach the last round after every earlier round is
        // complete, so the last index means the game is fully played.
        let standings = self.standings();
        let outcome = if standings.player1_wins >= WINS_REQUIRED {
            Some(SessionOutcome::Winner(Seat::One))
        } else if standings.player2_wins >= WINS_REQUIRED {
            Some(SessionOutcome::Winner(Seat::Two))
        } else if index == ROUNDS_PER_GAME - 1 {
            Some(
                standings
                    .leader()
                    .map_or(SessionOutcome::Draw, SessionOutcome::Winner),
            )
        } else {
            None
        };

        let snapshot = self.snapshot(index);
        match outcome {
            Some(SessionOutcome::Winner(winner)) => {
                self.outcome = outcome;
                Ok(MoveOutcome::Won {
                    winner,
                    round: snapshot,
                })
            }
            Some(SessionOutcome::Draw) => {
                self.outcome = outcome;
                Ok(MoveOutcome::Drawn(snapshot))
            }
            None => Ok(MoveOutcome::RoundResolved(snapshot)),
        }
    }

    /// Settle the session when the tournament round ends.
    ///
    /// A bye goes to the present player. An unfinished game goes to the side
    /// with more round wins, and a tie has no winner.
    pub fn resolve_for_round_end(&mut self) -> Option<Username> {
        if self.outcome.is_none() {
            let outcome = if self.player2.is_none() {
                SessionOutcome::Winner(Seat::One)
            } else {
                self.standings()
                    .leader()
                    .map_or(SessionOutcome::Draw, SessionOutcome::Winner)
            };
            self.outcome = Some(outcome);
        }
        self.winner().cloned()
    }

    /// Finalize an undecided session because `username` left.
    ///
    /// Returns the seat awarded the win, or `None` when nobody is left to
    /// take it or the session was already decided.
    pub fn forfeit(&mut self, username: &Username) -> Option<Seat> {
        if self.outcome.is_some() {
            return None;
        }
        let seat = self.seat_of(username)?;
        let winner = seat.other();
        if self.player(winner).is_some() {
            self.outcome = Some(SessionOutcome::Winner(winner));
            Some(winner)
        } else {
            self.outcome = Some(SessionOutcome::Draw);
            None
        }
    }
}
