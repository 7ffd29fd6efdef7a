//! Rock-paper-scissors tournament host using the async actor model.
//!
//! This server spawns a TournamentActor through the TournamentManager,
//! registers bot players and relays every event they receive to the log.

mod bots;
mod config;
mod logging;

use anyhow::Error;
use config::ServerConfig;
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use rps_arena::{TournamentManager, Username};
use std::time::Instant;
use tokio::{sync::mpsc, task::JoinSet};

const HELP: &str = "\
Host a Swiss-style rock-paper-scissors tournament with bot players

USAGE:
  rps_server [OPTIONS]

OPTIONS:
  --players    N           Number of bot players       [default: env RPS_PLAYERS or 8]
  --start-in   SECS        Delay before the start time [default: env RPS_START_DELAY_SECS or 5]
  --round-secs SECS        Length of each round        [default: env RPS_ROUND_SECS or 20]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  RPS_TOURNAMENT_ID        Tournament identifier
  RPS_START_CHECK_SECS     How often the start time is checked
  RPS_INBOX_CAPACITY       Tournament mailbox size
  RPS_OUTBOUND_CAPACITY    Per-player event buffer size
  RPS_SHUFFLE_PAIRINGS     Shuffle players inside win buckets (true/false)
  RUST_LOG                 Log filter (e.g., info, rps_arena=debug)
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let players = pargs.opt_value_from_str("--players")?;
    let start_in = pargs.opt_value_from_str("--start-in")?;
    let round_secs = pargs.opt_value_from_str("--round-secs")?;
    let config = ServerConfig::from_env(players, start_in, round_secs)?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();
    info!(
        "Hosting tournament {} with {} players",
        config.tournament_id, config.players
    );

    let manager = TournamentManager::new(config.tournament.clone())?;
    let start_delay = i64::try_from(config.start_delay_secs)
        .ok()
        .and_then(chrono::TimeDelta::try_seconds)
        .ok_or_else(|| {
            anyhow::anyhow!("Start delay {}s is out of range", config.start_delay_secs)
        })?;
    let start_at = chrono::Utc::now() + start_delay;
    let tournament = manager.get_or_create(config.tournament_id, start_at).await;

    let mut bots = JoinSet::new();
    for i in 0..config.players {
        let username = Username::new(&format!("bot{:03}", i + 1));
        let (tx, rx) = mpsc::channel(config.tournament.outbound_capacity);
        tournament.join(username.clone(), tx).await?;
        bots.spawn(bots::run_bot(tournament.clone(), username, rx));
    }
    info!("Registered {} bots, starting at {}", config.players, start_at);

    let started = Instant::now();
    let mut champion = None;
    while let Some(result) = bots.join_next().await {
        if let Some(winner) = result? {
            champion = Some(winner);
        }
    }

    logging::log_tournament_result(
        config.tournament_id,
        champion.as_ref().map(Username::as_str),
        started.elapsed().as_millis() as u64,
    );

    let pruned = manager.prune_completed().await;
    info!("Pruned {} completed tournament(s)", pruned);

    Ok(())
}
