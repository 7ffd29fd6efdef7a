//! Best-effort event delivery to player channels.
//!
//! Delivery never waits: a full channel drops the event and a closed channel
//! is reported, so one slow connection cannot stall the actor loop.

use super::{messages::Event, models::Player, models::WaitingRoom};
use crate::game::Username;
use tokio::sync::mpsc;

/// Result of a single delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Channel full, event dropped
    Dropped,
    /// Receiver gone
    Disconnected,
    /// Username not registered
    Unknown,
}

/// Push an event onto a player's outbound channel without blocking
pub fn notify(player: &Player, event: Event) -> Delivery {
    match player.outbound.try_send(event) {
        Ok(()) => Delivery::Delivered,
        Err(mpsc::error::TrySendError::Full(event)) => {
            log::warn!(
                "Player {} channel full, dropping {} event",
                player.username,
                event.name()
            );
            Delivery::Dropped
        }
        Err(mpsc::error::TrySendError::Closed(event)) => {
            log::debug!(
                "Player {} disconnected, {} event not delivered",
                player.username,
                event.name()
            );
            Delivery::Disconnected
        }
    }
}

/// Look up a registered player and notify them
pub fn notify_user(room: &WaitingRoom, username: &Username, event: Event) -> Delivery {
    match room.get(username) {
        Some(player) => notify(player, event),
        None => {
            log::debug!(
                "Player {} is no longer registered, {} event not delivered",
                username,
                event.name()
            );
            Delivery::Unknown
        }
    }
}

/// Notify every registered player
pub fn broadcast(room: &WaitingRoom, event: &Event) {
    for player in room.iter() {
        notify(player, event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::messages::TournamentEnded;

    fn ended() -> Event {
        Event::TournamentEnded(TournamentEnded {
            tournament_id: 1,
            winner: None,
        })
    }

    #[test]
    fn test_delivered() {
        let (tx, mut rx) = mpsc::channel(1);
        let player = Player::new(Username::from("alice"), tx);

        assert_eq!(notify(&player, ended()), Delivery::Delivered);
        assert_eq!(rx.try_recv().unwrap(), ended());
    }

    #[test]
    fn test_full_channel_drops_without_blocking() {
        let (tx, mut rx) = mpsc::channel(1);
        let player = Player::new(Username::from("alice"), tx);

        assert_eq!(notify(&player, ended()), Delivery::Delivered);
        assert_eq!(notify(&player, ended()), Delivery::Dropped);
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let player = Player::new(Username::from("alice"), tx);
        assert_eq!(notify(&player, ended()), Delivery::Disconnected);
    }

    #[test]
    fn test_notify_unknown_user() {
        let room = WaitingRoom::new();
        assert_eq!(
            notify_user(&room, &Username::from("ghost"), ended()),
            Delivery::Unknown
        );
    }

    #[test]
    fn test_broadcast_reaches_everyone() {
        let mut room = WaitingRoom::new();
        let (tx_a, mut rx_a) = mpsc::channel(4);
        let (tx_b, mut rx_b) = mpsc::channel(4);
        room.join(Player::new(Username::from("a"), tx_a));
        room.join(Player::new(Username::from("b"), tx_b));

        broadcast(&room, &ended());
        assert_eq!(rx_a.try_recv().unwrap(), ended());
        assert_eq!(rx_b.try_recv().unwrap(), ended());
    }
}
