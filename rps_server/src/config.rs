//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use rps_arena::{TournamentConfig, tournament::TournamentId};
use std::time::Duration;

/// Longest accepted delay before the tournament starts (one week)
pub const MAX_START_DELAY_SECS: u64 = 7 * 24 * 60 * 60;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Tournament to host
    pub tournament_id: TournamentId,
    /// Number of bot players to register
    pub players: usize,
    /// Seconds between startup and the scheduled start
    pub start_delay_secs: u64,
    /// Per-tournament settings
    pub tournament: TournamentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `players_override` - Optional player count override (from CLI args)
    /// * `start_delay_override` - Optional start delay override (from CLI args)
    /// * `round_secs_override` - Optional round length override (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<ServerConfig, ConfigError>` - Loaded configuration or error
    pub fn from_env(
        players_override: Option<usize>,
        start_delay_override: Option<u64>,
        round_secs_override: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let defaults = TournamentConfig::default();

        let round_secs = round_secs_override.unwrap_or_else(|| {
            parse_env_or("RPS_ROUND_SECS", defaults.round_duration.as_secs())
        });
        let check_secs = parse_env_or(
            "RPS_START_CHECK_SECS",
            defaults.start_check_interval.as_secs(),
        );

        let tournament = TournamentConfig {
            start_check_interval: Duration::from_secs(check_secs),
            round_duration: Duration::from_secs(round_secs),
            inbox_capacity: parse_env_or("RPS_INBOX_CAPACITY", defaults.inbox_capacity),
            outbound_capacity: parse_env_or("RPS_OUTBOUND_CAPACITY", defaults.outbound_capacity),
            shuffle_pairings: parse_env_or("RPS_SHUFFLE_PAIRINGS", defaults.shuffle_pairings),
        };

        let config = ServerConfig {
            tournament_id: parse_env_or("RPS_TOURNAMENT_ID", 1),
            players: players_override.unwrap_or_else(|| parse_env_or("RPS_PLAYERS", 8)),
            start_delay_secs: start_delay_override
                .unwrap_or_else(|| parse_env_or("RPS_START_DELAY_SECS", 5)),
            tournament,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players == 0 {
            return Err(ConfigError::Invalid {
                var: "RPS_PLAYERS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.players > 1024 {
            return Err(ConfigError::Invalid {
                var: "RPS_PLAYERS".to_string(),
                reason: "Must be at most 1024".to_string(),
            });
        }

        if self.start_delay_secs > MAX_START_DELAY_SECS {
            return Err(ConfigError::Invalid {
                var: "RPS_START_DELAY_SECS".to_string(),
                reason: format!("Must be at most {MAX_START_DELAY_SECS}"),
            });
        }

        self.tournament
            .validate()
            .map_err(|e| ConfigError::Invalid {
                var: "RPS_*".to_string(),
                reason: e.to_string(),
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
