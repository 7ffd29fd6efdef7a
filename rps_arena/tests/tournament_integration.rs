//! Integration tests for the tournament actor
//!
//! These tests drive real actors through their handles and observe the
//! events delivered to each player's outbound channel.

use chrono::{DateTime, Utc};
use rps_arena::game::{Move, Username};
use rps_arena::tournament::{
    Event, TournamentActor, TournamentConfig, TournamentHandle, TournamentState,
};
use std::time::Duration;
use tokio::sync::mpsc;

fn far_future() -> DateTime<Utc> {
    Utc::now() + chrono::Duration::days(1)
}

/// Rounds only advance when the test sends `end_match`
fn manual_config() -> TournamentConfig {
    TournamentConfig {
        round_duration: Duration::from_secs(3600),
        shuffle_pairings: false,
        ..Default::default()
    }
}

fn spawn_manual(id: i64) -> TournamentHandle {
    TournamentActor::spawn(id, far_future(), manual_config())
}

async fn join(handle: &TournamentHandle, name: &str) -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel(64);
    handle.join(name, tx).await.unwrap();
    rx
}

fn drain(rx: &mut mpsc::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Wait until every command sent so far has been processed
async fn settle(handle: &TournamentHandle) {
    handle.state().await.unwrap();
}

#[tokio::test]
async fn test_two_player_scenario() {
    let handle = spawn_manual(1);
    let mut alice = join(&handle, "alice").await;
    let mut bob = join(&handle, "bob").await;

    handle.start_match().await.unwrap();
    settle(&handle).await;

    let started = drain(&mut alice);
    match &started[..] {
        [Event::GameStarted(game)] => {
            assert_eq!(game.round, 0);
            assert_eq!(game.opponent, Some(Username::from("bob")));
        }
        other => panic!("unexpected events: {:?}", other),
    }
    drain(&mut bob);

    // First round: alice rock beats bob scissors
    handle.make_move("alice", Move::Rock).await.unwrap();
    handle.make_move("bob", Move::Scissors).await.unwrap();
    settle(&handle).await;

    let alice_events = drain(&mut alice);
    assert_eq!(alice_events.len(), 2);
    assert!(matches!(&alice_events[0], Event::MoveAccepted(r) if r.winner == 0));
    assert!(matches!(&alice_events[1], Event::MoveAccepted(r) if r.winner == 1));
    assert!(matches!(&drain(&mut bob)[..], [Event::MoveAccepted(r)] if r.winner == 1));

    // Four more identical rounds; the game is decided on the third
    for _ in 0..4 {
        handle.make_move("alice", Move::Rock).await.unwrap();
        handle.make_move("bob", Move::Scissors).await.unwrap();
    }
    settle(&handle).await;

    let alice_events = drain(&mut alice);
    let bob_events = drain(&mut bob);
    assert!(matches!(alice_events.last(), Some(Event::GameWon(r)) if r.index == 2));
    assert!(matches!(bob_events.last(), Some(Event::GameLost(r)) if r.index == 2));
    assert_eq!(
        alice_events
            .iter()
            .filter(|e| matches!(e, Event::GameWon(_)))
            .count(),
        1
    );

    handle.end_match().await.unwrap();
    let snapshot = handle.state().await.unwrap();
    assert_eq!(snapshot.state, TournamentState::Completed);
    assert_eq!(snapshot.lobby_count, 1);
    assert_eq!(snapshot.winner, Some(Username::from("alice")));

    let alice_events = drain(&mut alice);
    assert!(matches!(&alice_events[0], Event::GameEnded(g) if g.winner == Some(Username::from("alice"))));
    assert!(matches!(&alice_events[1], Event::TournamentEnded(t) if t.winner == Some(Username::from("alice"))));
    assert!(matches!(drain(&mut bob).last(), Some(Event::TournamentEnded(_))));
}

#[tokio::test]
async fn test_round_zero_seats_every_player_once() {
    for n in 1..=9usize {
        let handle = spawn_manual(n as i64);
        let mut receivers = Vec::new();
        for i in 0..n {
            receivers.push(join(&handle, &format!("player{i}")).await);
        }

        handle.start_match().await.unwrap();
        let snapshot = handle.state().await.unwrap();
        assert_eq!(snapshot.live_games, n.div_ceil(2), "players: {n}");

        let mut byes = 0;
        for rx in &mut receivers {
            let events = drain(rx);
            assert_eq!(events.len(), 1, "players: {n}");
            match &events[0] {
                Event::GameStarted(game) if game.opponent.is_none() => byes += 1,
                Event::GameStarted(_) => {}
                other => panic!("unexpected event {:?}", other),
            }
        }
        assert_eq!(byes, n % 2, "players: {n}");
    }
}

#[tokio::test]
async fn test_five_players_get_three_lobbies() {
    let handle = spawn_manual(5);
    let mut receivers = Vec::new();
    for name in ["a", "b", "c", "d", "e"] {
        receivers.push(join(&handle, name).await);
    }

    handle.start_match().await.unwrap();
    let snapshot = handle.state().await.unwrap();
    assert_eq!(snapshot.lobby_count, 3);
    assert_eq!(snapshot.live_games, 3);

    // Without shuffling the last registered player sits out
    let last = drain(&mut receivers[4]);
    assert!(matches!(&last[..], [Event::GameStarted(g)] if g.opponent.is_none()));

    for _ in 0..3 {
        handle.end_match().await.unwrap();
    }
    let snapshot = handle.state().await.unwrap();
    assert_eq!(snapshot.state, TournamentState::Completed);
}

#[tokio::test]
async fn test_leave_before_start() {
    let handle = spawn_manual(1);
    let _alice = join(&handle, "alice").await;
    let _bob = join(&handle, "bob").await;
    handle.leave("bob").await.unwrap();
    handle.leave("nobody").await.unwrap();

    handle.start_match().await.unwrap();
    let snapshot = handle.state().await.unwrap();
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(snapshot.live_games, 1);
}

#[tokio::test]
async fn test_duplicate_join_keeps_first_channel() {
    let handle = spawn_manual(1);
    let mut first = join(&handle, "alice").await;
    let mut second = join(&handle, "alice").await;

    handle.start_match().await.unwrap();
    settle(&handle).await;

    assert_eq!(drain(&mut first).len(), 1);
    assert!(drain(&mut second).is_empty());
}

#[tokio::test]
async fn test_protocol_errors_are_dropped() {
    let handle = spawn_manual(1);
    let _alice = join(&handle, "alice").await;

    handle
        .submit_wire(Username::from("alice"), "explode", None)
        .await
        .unwrap();
    handle
        .submit_wire(Username::from("alice"), "move", Some("lizard"))
        .await
        .unwrap();
    handle.make_move("alice", Move::Rock).await.unwrap();

    let snapshot = handle.state().await.unwrap();
    assert_eq!(snapshot.state, TournamentState::Forming);

    handle
        .submit_wire(Username::from("alice"), "startMatch", None)
        .await
        .unwrap();
    assert_eq!(handle.state().await.unwrap().state, TournamentState::Running);
}

#[tokio::test]
async fn test_slow_player_does_not_stall_actor() {
    let handle = spawn_manual(1);
    let (slow_tx, _slow_rx) = mpsc::channel(1);
    handle.join("slow", slow_tx).await.unwrap();
    let mut fast = join(&handle, "fast").await;

    handle.start_match().await.unwrap();
    for _ in 0..5 {
        handle.make_move("fast", Move::Paper).await.unwrap();
    }
    let snapshot = handle.state().await.unwrap();
    assert_eq!(snapshot.state, TournamentState::Running);
    assert_eq!(drain(&mut fast).len(), 6);
}

#[tokio::test]
async fn test_actor_stops_when_handles_dropped() {
    let (actor, handle) = TournamentActor::new(1, far_future(), manual_config());
    let task = tokio::spawn(actor.run());
    let _alice = join(&handle, "alice").await;

    drop(handle);
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("actor should stop")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_timers_drive_full_tournament() {
    let config = TournamentConfig {
        shuffle_pairings: false,
        ..Default::default()
    };
    let start_at = Utc::now() + chrono::Duration::seconds(10);
    let handle = TournamentActor::spawn(1, start_at, config);

    let mut a = join(&handle, "a").await;
    let _b = join(&handle, "b").await;
    let _c = join(&handle, "c").await;

    // Nobody plays: a and b draw every round, c takes the byes
    let mut seen = Vec::new();
    loop {
        match a.recv().await {
            Some(Event::TournamentEnded(ended)) => {
                assert_eq!(ended.winner, Some(Username::from("c")));
                break;
            }
            Some(event) => seen.push(event),
            None => panic!("channel closed"),
        }
    }

    let started = seen
        .iter()
        .filter(|e| matches!(e, Event::GameStarted(_)))
        .count();
    assert_eq!(started, 2);

    let snapshot = handle.state().await.unwrap();
    assert_eq!(snapshot.state, TournamentState::Completed);
    let c = snapshot
        .players
        .iter()
        .find(|s| s.username.as_str() == "c")
        .unwrap();
    assert_eq!(c.wins, 2);
}
