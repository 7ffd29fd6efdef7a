//! Periodic tasks that feed lifecycle commands into a tournament actor.
//!
//! Both tasks hold a [`WeakSender`], so an actor whose handles are all
//! dropped still shuts down even while a timer is armed.

use super::{messages::Command, models::TournamentId};
use chrono::{DateTime, Utc};
use tokio::{
    sync::mpsc::WeakSender,
    task::JoinHandle,
    time::{Duration, Instant, MissedTickBehavior, interval, interval_at},
};

/// Poll every `period` until `start_at` has passed, then submit
/// [`Command::StartMatch`] once and exit.
///
/// Whether the tournament has already started is decided by the actor.
pub fn spawn_start_check(
    tournament_id: TournamentId,
    sender: WeakSender<Command>,
    start_at: DateTime<Utc>,
    period: Duration,
) -> JoinHandle<()> {
    let delay = (start_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
    let deadline = Instant::now() + delay;

    tokio::spawn(async move {
        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            if Instant::now() < deadline {
                continue;
            }

            let Some(sender) = sender.upgrade() else {
                return;
            };
            log::info!(
                "Tournament {}: start time {} has passed, starting",
                tournament_id,
                start_at
            );
            if sender.send(Command::StartMatch).await.is_err() {
                log::debug!("Tournament {}: closed before start", tournament_id);
            }
            return;
        }
    })
}

/// Submit [`Command::EndMatch`] every `period`, first one a full period
/// from now. Exits once the actor is gone.
pub fn spawn_round_ticker(
    tournament_id: TournamentId,
    sender: WeakSender<Command>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let Some(sender) = sender.upgrade() else {
                break;
            };
            log::debug!("Tournament {}: round time is up", tournament_id);
            if sender.send(Command::EndMatch).await.is_err() {
                break;
            }
        }
    })
}

/// Timer tasks owned by one actor. Dropping the set aborts them.
#[derive(Debug, Default)]
pub struct Timers {
    start_check: Option<JoinHandle<()>>,
    round_ticker: Option<JoinHandle<()>>,
}

impl Timers {
    pub fn arm_start_check(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.start_check.replace(handle) {
            previous.abort();
        }
    }

    pub fn arm_round_ticker(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.round_ticker.replace(handle) {
            previous.abort();
        }
    }

    pub fn stop_start_check(&mut self) {
        if let Some(handle) = self.start_check.take() {
            handle.abort();
        }
    }

    pub fn stop_all(&mut self) {
        self.stop_start_check();
        if let Some(handle) = self.round_ticker.take() {
            handle.abort();
        }
    }

    pub fn is_round_ticker_armed(&self) -> bool {
        self.round_ticker.is_some()
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_start_check_waits_for_start_time() {
        let (tx, mut rx) = mpsc::channel(8);
        let start_at = Utc::now() + chrono::Duration::seconds(12);
        let handle = spawn_start_check(1, tx.downgrade(), start_at, Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(rx.try_recv().is_err());

        let cmd = rx.recv().await.unwrap();
        assert!(matches!(cmd, Command::StartMatch));
        handle.await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_check_past_start_fires_immediately() {
        let (tx, mut rx) = mpsc::channel(8);
        let start_at = Utc::now() - chrono::Duration::seconds(60);
        spawn_start_check(1, tx.downgrade(), start_at, Duration::from_secs(5));

        assert!(matches!(rx.recv().await, Some(Command::StartMatch)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_ticker_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle = spawn_round_ticker(1, tx.downgrade(), Duration::from_secs(20));

        tokio::time::sleep(Duration::from_secs(19)).await;
        assert!(rx.try_recv().is_err());

        assert!(matches!(rx.recv().await, Some(Command::EndMatch)));
        assert!(matches!(rx.recv().await, Some(Command::EndMatch)));
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_exits_when_actor_gone() {
        let (tx, rx) = mpsc::channel(8);
        let weak = tx.downgrade();
        drop(tx);
        drop(rx);

        let handle = spawn_round_ticker(1, weak, Duration::from_secs(1));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_dropping_timers_aborts_tasks() {
        let (tx, _rx) = mpsc::channel::<Command>(8);
        let mut timers = Timers::default();
        let handle = spawn_round_ticker(1, tx.downgrade(), Duration::from_secs(3600));
        let abort = handle.abort_handle();
        timers.arm_round_ticker(handle);
        assert!(timers.is_round_ticker_armed());

        drop(timers);
        for _ in 0..10 {
            if abort.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(abort.is_finished());
    }
}
