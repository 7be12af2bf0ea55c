//! Exhaustive check that the minimax opponent never loses.
//!
//! Every possible sequence of opponent replies is enumerated, with minimax
//! moving first and moving second.

use solo_tictactoe::{
    Board, HeuristicStrategy, LINES, Mark, MinimaxStrategy, Move, Strategy, winner,
};

#[derive(Debug, Default)]
struct Tally {
    games: usize,
    wins: usize,
    draws: usize,
}

/// Explores all games from `board` where `engine` plays minimax and the other
/// side tries every legal move. Panics on the first lost game.
fn explore(board: Board, to_move: Mark, engine: Mark, tally: &mut Tally) {
    if let Some(mark) = winner(&board) {
        assert_eq!(mark, engine, "minimax lost:\n{board}");
        tally.games += 1;
        tally.wins += 1;
        return;
    }
    if board.is_full() {
        tally.games += 1;
        tally.draws += 1;
        return;
    }

    if to_move == engine {
        let mv = MinimaxStrategy.select_move(&board, engine).unwrap();
        let mut next = board;
        next.place(mv.row(), mv.col(), engine).unwrap();
        explore(next, to_move.opponent(), engine, tally);
    } else {
        for mv in board.empty_cells() {
            let mut next = board;
            next.place(mv.row(), mv.col(), to_move).unwrap();
            explore(next, to_move.opponent(), engine, tally);
        }
    }
}

#[test]
fn test_minimax_moving_first_never_loses() {
    let mut tally = Tally::default();
    explore(Board::empty(), Mark::X, Mark::X, &mut tally);

    assert!(tally.games > 0);
    assert!(tally.wins > 0, "weak replies should be punished");
    assert_eq!(tally.games, tally.wins + tally.draws);
}

#[test]
fn test_minimax_moving_second_never_loses() {
    let mut tally = Tally::default();
    explore(Board::empty(), Mark::X, Mark::O, &mut tally);

    assert!(tally.games > 0);
    assert!(tally.draws > 0);
    assert_eq!(tally.games, tally.wins + tally.draws);
}

#[test]
fn test_minimax_takes_every_available_win() {
    // The side to move has an immediate win in each position.
    let positions = ["XX./OO./...", "X.O/XO./...", "O.X/.X./..O"];
    for text in positions {
        let board: Board = text.parse().unwrap();
        let mover = if board.count(Mark::X) > board.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        };
        let mv = MinimaxStrategy.select_move(&board, mover).unwrap();
        let mut next = board;
        next.place(mv.row(), mv.col(), mover).unwrap();
        assert_eq!(winner(&next), Some(mover), "missed a win on {text}");
    }
}

#[test]
fn test_heuristic_blocks_threat_on_every_line() {
    for line in LINES {
        let [a, b, gap] = line;
        let spare = Move::ALL
            .into_iter()
            .find(|mv| !line.contains(mv))
            .unwrap();

        let mut board = Board::empty();
        board.place(a.row(), a.col(), Mark::X).unwrap();
        board.place(b.row(), b.col(), Mark::X).unwrap();
        board.place(spare.row(), spare.col(), Mark::O).unwrap();

        let mv = HeuristicStrategy.select_move(&board, Mark::O).unwrap();
        assert_eq!(mv, gap, "O should block {line:?}");
    }
}
