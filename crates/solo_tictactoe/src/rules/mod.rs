//! Rules for tic-tac-toe: win detection, draw detection and game status.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{LINES, winner, winner_after};

use crate::types::{Board, GameStatus, Mark};
use tracing::instrument;

/// Status of `board` from the point of view of the player holding `user_mark`.
///
/// A pure function of its inputs. The human always opens a game, so the user
/// moved last exactly when they have more pieces than the computer; that mark
/// wins the (unreachable) case of both marks holding a line.
#[instrument(level = "trace")]
pub fn status(board: &Board, user_mark: Mark) -> GameStatus {
    let computer_mark = user_mark.opponent();
    let last = if board.count(user_mark) > board.count(computer_mark) {
        user_mark
    } else {
        computer_mark
    };

    match winner_after(board, last) {
        Some(mark) if mark == user_mark => GameStatus::UserWin,
        Some(_) => GameStatus::ComputerWin,
        None if is_full(board) => GameStatus::Draw,
        None => GameStatus::Active,
    }
}
