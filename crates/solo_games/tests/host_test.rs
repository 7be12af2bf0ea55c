//! Tests for the host loop and its delayed computer move.

use solo_games::{Flow, GameEvent, Host, UserCommand};
use solo_tictactoe::{Board, Difficulty, GameSession, GameStatus, Mark, Settings};
use std::time::Duration;
use tokio::io::BufReader;
use tokio::sync::mpsc;

const DELAY: Duration = Duration::from_millis(250);

fn heuristic_host() -> (Host, mpsc::UnboundedReceiver<GameEvent>) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let session =
        GameSession::with_settings(Settings::default().with_difficulty(Difficulty::Heuristic));
    (Host::new(session, DELAY, event_tx), event_rx)
}

fn collect(event_rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = event_rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn test_computer_replies_after_delay() {
    let (mut host, mut event_rx) = heuristic_host();

    host.handle(UserCommand::Place { row: 0, col: 0 }).unwrap();
    let deadline = host.deadline().expect("Computer move should be scheduled");
    assert!(collect(&mut event_rx).contains(&GameEvent::ComputerThinking));
    assert_eq!(host.session().board().count(Mark::X), 0);

    tokio::time::sleep_until(deadline).await;
    host.fire().unwrap();

    assert_eq!(host.deadline(), None);
    assert_eq!(host.session().board().count(Mark::X), 1);
    assert!(collect(&mut event_rx).iter().any(|event| matches!(
        event,
        GameEvent::MoveMade { by_user: false, .. }
    )));
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_delay_discards_computer_move() {
    let (mut host, _event_rx) = heuristic_host();

    host.handle(UserCommand::Place { row: 1, col: 1 }).unwrap();
    assert!(host.deadline().is_some());

    host.handle(UserCommand::Reset).unwrap();
    assert_eq!(host.deadline(), None);

    tokio::time::sleep(DELAY * 2).await;
    host.fire().unwrap();

    assert_eq!(*host.session().board(), Board::empty());
    assert_eq!(host.session().status(), GameStatus::Active);
}

#[tokio::test(start_paused = true)]
async fn test_move_while_computer_thinks_is_rejected() {
    let (mut host, mut event_rx) = heuristic_host();

    host.handle(UserCommand::Place { row: 0, col: 0 }).unwrap();
    collect(&mut event_rx);

    host.handle(UserCommand::Place { row: 2, col: 2 }).unwrap();
    let events = collect(&mut event_rx);
    assert!(matches!(events.as_slice(), [GameEvent::CommandRejected { .. }]));
    assert_eq!(host.session().board().count(Mark::O), 1);
}

#[tokio::test(start_paused = true)]
async fn test_settings_locked_mid_game() {
    let (mut host, mut event_rx) = heuristic_host();

    host.handle(UserCommand::Place { row: 0, col: 0 }).unwrap();
    collect(&mut event_rx);

    host.handle(UserCommand::Difficulty(Difficulty::Minimax))
        .unwrap();
    assert!(matches!(
        collect(&mut event_rx).as_slice(),
        [GameEvent::CommandRejected { .. }]
    ));
    assert_eq!(host.session().difficulty(), Difficulty::Heuristic);

    host.handle(UserCommand::Color(solo_tictactoe::Color::Blue))
        .unwrap();
    assert!(matches!(
        collect(&mut event_rx).as_slice(),
        [GameEvent::SettingsChanged(_)]
    ));
}

#[tokio::test(start_paused = true)]
async fn test_run_plays_script_and_waits_for_last_reply() {
    let (mut host, mut event_rx) = heuristic_host();

    let script = "help\n5\n";
    host.run(BufReader::new(script.as_bytes())).await.unwrap();

    let board = host.session().board();
    assert_eq!(board.count(Mark::O), 1);
    assert_eq!(board.count(Mark::X), 1);

    let events = collect(&mut event_rx);
    assert!(matches!(events[0], GameEvent::SettingsChanged(_)));
    assert!(events.contains(&GameEvent::Help));
    assert!(events.contains(&GameEvent::ComputerThinking));
}

#[tokio::test(start_paused = true)]
async fn test_run_reset_before_reply_leaves_empty_board() {
    let (mut host, _event_rx) = heuristic_host();

    host.run(BufReader::new("5\nstart over\n".as_bytes()))
        .await
        .unwrap();

    assert_eq!(*host.session().board(), Board::empty());
}

#[tokio::test(start_paused = true)]
async fn test_quit_stops_reading() {
    let (mut host, _event_rx) = heuristic_host();

    host.run(BufReader::new("quit\n5\n".as_bytes())).await.unwrap();

    assert_eq!(*host.session().board(), Board::empty());
    assert_eq!(host.handle(UserCommand::Quit).unwrap(), Flow::Quit);
}

#[tokio::test(start_paused = true)]
async fn test_unparsed_line_is_rejected_not_fatal() {
    let (mut host, mut event_rx) = heuristic_host();

    assert_eq!(host.handle_line("fly away").unwrap(), Flow::Continue);
    assert_eq!(host.handle_line("").unwrap(), Flow::Continue);

    let events = collect(&mut event_rx);
    assert!(matches!(events.as_slice(), [GameEvent::CommandRejected { .. }]));
}
