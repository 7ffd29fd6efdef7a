//! Tournament configuration models.

use super::errors::{TournamentError, TournamentResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// How often the scheduler checks whether the start time has passed
    /// (default: 5s)
    pub start_check_interval: Duration,

    /// Length of one Swiss round before the ticker closes it (default: 20s)
    pub round_duration: Duration,

    /// Actor mailbox capacity
    pub inbox_capacity: usize,

    /// Suggested capacity for each player's outbound event channel
    pub outbound_capacity: usize,

    /// Randomize player order inside each win bucket before pairing
    pub shuffle_pairings: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            start_check_interval: Duration::from_secs(5),
            round_duration: Duration::from_secs(20),
            inbox_capacity: 100,
            outbound_capacity: 32,
            shuffle_pairings: true,
        }
    }
}

impl TournamentConfig {
    /// Validate configuration
    pub fn validate(&self) -> TournamentResult<()> {
        if self.start_check_interval.is_zero() {
            return Err(TournamentError::InvalidConfig(
                "Start check interval must be greater than zero".to_string(),
            ));
        }

        if self.round_duration.is_zero() {
            return Err(TournamentError::InvalidConfig(
                "Round duration must be greater than zero".to_string(),
            ));
        }

        if self.inbox_capacity == 0 || self.outbound_capacity == 0 {
            return Err(TournamentError::InvalidConfig(
                "Channel capacities must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
