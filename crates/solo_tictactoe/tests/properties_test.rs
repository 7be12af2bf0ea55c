//! Property tests over randomly played positions.

use proptest::prelude::*;
use solo_tictactoe::{
    Board, ComputerReply, Difficulty, GameSession, GameStatus, HeuristicStrategy, LINES, Mark,
    MinimaxStrategy, Move, RandomStrategy, Settings, Strategy, status, winner,
};

/// Plays `choices` alternately from an empty board, X first, each choice
/// indexing into the remaining empty cells. Stops at the first terminal board.
fn play_out(choices: &[usize]) -> Vec<Board> {
    let mut board = Board::empty();
    let mut to_move = Mark::X;
    let mut boards = vec![board];
    for choice in choices {
        if winner(&board).is_some() || board.is_full() {
            break;
        }
        let cells = board.empty_cells();
        let mv = cells[choice % cells.len()];
        board.place(mv.row(), mv.col(), to_move).unwrap();
        boards.push(board);
        to_move = to_move.opponent();
    }
    boards
}

fn lines_held_by(board: &Board, mark: Mark) -> usize {
    LINES
        .iter()
        .filter(|line| {
            line.iter()
                .all(|mv| board.get(mv.row(), mv.col()).unwrap().mark() == Some(mark))
        })
        .count()
}

proptest! {
    #[test]
    fn prop_place_shrinks_empty_cells_by_one(choices in prop::collection::vec(0usize..9, 0..9)) {
        let boards = play_out(&choices);
        for pair in boards.windows(2) {
            prop_assert_eq!(pair[0].empty_cells().len(), pair[1].empty_cells().len() + 1);
        }
    }

    #[test]
    fn prop_at_most_one_mark_wins(choices in prop::collection::vec(0usize..9, 0..9)) {
        for board in play_out(&choices) {
            let x = lines_held_by(&board, Mark::X) > 0;
            let o = lines_held_by(&board, Mark::O) > 0;
            prop_assert!(!(x && o));
            match winner(&board) {
                Some(mark) => prop_assert!(lines_held_by(&board, mark) > 0),
                None => prop_assert!(!x && !o),
            }
        }
    }

    #[test]
    fn prop_status_is_pure(choices in prop::collection::vec(0usize..9, 0..9)) {
        for board in play_out(&choices) {
            for mark in [Mark::X, Mark::O] {
                let snapshot = board;
                let first = status(&board, mark);
                prop_assert_eq!(first, status(&board, mark));
                prop_assert_eq!(board, snapshot);
            }
        }
    }

    #[test]
    fn prop_heuristic_blocks_single_threat(choices in prop::collection::vec(0usize..9, 0..8)) {
        let board = *play_out(&choices).last().unwrap();
        prop_assume!(winner(&board).is_none() && !board.is_full());

        let me = if board.count(Mark::X) > board.count(Mark::O) { Mark::O } else { Mark::X };
        let wins_for = |mark: Mark| -> Vec<Move> {
            board
                .empty_cells()
                .into_iter()
                .filter(|mv| {
                    let mut next = board;
                    next.place(mv.row(), mv.col(), mark).unwrap();
                    winner(&next) == Some(mark)
                })
                .collect()
        };
        let own = wins_for(me);
        let threats = wins_for(me.opponent());

        let choice = HeuristicStrategy.select_move(&board, me).unwrap();
        if !own.is_empty() {
            prop_assert!(own.contains(&choice));
        } else if threats.len() == 1 {
            prop_assert_eq!(choice, threats[0]);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_minimax_never_loses_to_random(seed in any::<u64>(), human_first_choice in 0usize..9) {
        let mut session = GameSession::with_settings(
            Settings::default().with_difficulty(Difficulty::Minimax),
        );
        let mut human = RandomStrategy::seeded(seed);

        let opening = Move::from_index(human_first_choice).unwrap();
        let mut report = session.apply_human_move(opening.row(), opening.col()).unwrap();
        loop {
            if let Some(ticket) = report.pending() {
                match session.resolve_computer_move(*ticket).unwrap() {
                    ComputerReply::Applied(_) => {}
                    ComputerReply::Stale => prop_assert!(false, "fresh ticket went stale"),
                }
            }
            if session.status() != GameStatus::Active {
                break;
            }
            let mv = human.select_move(session.board(), session.user_mark()).unwrap();
            report = session.apply_human_move(mv.row(), mv.col()).unwrap();
        }
        prop_assert_ne!(session.status(), GameStatus::UserWin);
    }

    #[test]
    fn prop_minimax_move_is_best_scored(choices in prop::collection::vec(0usize..9, 1..7)) {
        let board = *play_out(&choices).last().unwrap();
        prop_assume!(winner(&board).is_none() && !board.is_full());
        let me = if board.count(Mark::X) > board.count(Mark::O) { Mark::O } else { Mark::X };

        let scores = MinimaxStrategy.score_moves(&board, me).unwrap();
        let best = scores.iter().map(|(_, s)| *s).max().unwrap();
        let first_best = scores.iter().find(|(_, s)| *s == best).unwrap().0;

        prop_assert_eq!(MinimaxStrategy.select_move(&board, me).unwrap(), first_best);
    }
}
