//! Win detection logic for tic-tac-toe.

use crate::action::Move;
use crate::types::{Board, Mark};
use std::cmp::Ordering;
use tracing::instrument;

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [[Move; 3]; 8] = [
    // Rows
    [Move::new(0, 0), Move::new(0, 1), Move::new(0, 2)],
    [Move::new(1, 0), Move::new(1, 1), Move::new(1, 2)],
    [Move::new(2, 0), Move::new(2, 1), Move::new(2, 2)],
    // Columns
    [Move::new(0, 0), Move::new(1, 0), Move::new(2, 0)],
    [Move::new(0, 1), Move::new(1, 1), Move::new(2, 1)],
    [Move::new(0, 2), Move::new(1, 2), Move::new(2, 2)],
    // Diagonals
    [Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)],
    [Move::new(0, 2), Move::new(1, 1), Move::new(2, 0)],
];

/// Mark holding all three cells of `line`, if any.
fn line_owner(board: &Board, [a, b, c]: [Move; 3]) -> Option<Mark> {
    let sq = board.at(a);
    if sq == board.at(b) && sq == board.at(c) {
        sq.mark()
    } else {
        None
    }
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if a mark has three in a row, `None` otherwise.
/// A board where both marks hold a line cannot arise from alternating play;
/// for such a board the mark with more pieces (the one that moved last) is
/// reported, and with equal counts the first line in row, column, diagonal
/// order decides.
#[instrument(level = "trace")]
pub fn winner(board: &Board) -> Option<Mark> {
    match board.count(Mark::X).cmp(&board.count(Mark::O)) {
        Ordering::Greater => winner_after(board, Mark::X),
        Ordering::Less => winner_after(board, Mark::O),
        Ordering::Equal => LINES.iter().find_map(|line| line_owner(board, *line)),
    }
}

/// Winner of `board` when `last` made the most recent move.
///
/// Identical to [`winner`] in valid play; when both marks hold a line the
/// line completed by `last` takes precedence.
#[instrument(level = "trace")]
pub fn winner_after(board: &Board, last: Mark) -> Option<Mark> {
    let mut found = None;
    for line in LINES {
        if let Some(owner) = line_owner(board, line) {
            if owner == last {
                return Some(owner);
            }
            found.get_or_insert(owner);
        }
    }
    found
}
