//! Computer opponents.
//!
//! Every strategy answers the same question: given a board that is not full
//! and the mark to play, which empty cell? Ties are always broken towards the
//! lowest row-major coordinate, so only [`RandomStrategy`] is nondeterministic.

mod heuristic;
mod minimax;
mod random;

pub use heuristic::HeuristicStrategy;
pub use minimax::MinimaxStrategy;
pub use random::RandomStrategy;

use crate::action::Move;
use crate::error::GameError;
use crate::types::Board;
use crate::types::Mark;
use serde::{Deserialize, Serialize};

/// A move-selection algorithm for the computer player.
pub trait Strategy {
    /// Chooses an empty cell for `mark` to play on `board`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoLegalMove` if the board is full.
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move, GameError>;

    /// Short display name.
    fn name(&self) -> &'static str;
}

/// Which strategy the computer plays with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random empty cell.
    #[default]
    Random,
    /// Win if possible, else block, else first empty cell.
    Heuristic,
    /// Perfect play by exhaustive search.
    Minimax,
}

/// Row-major empty cells of `board`, or `NoLegalMove` if there are none.
pub(crate) fn legal_moves(board: &Board) -> Result<Vec<Move>, GameError> {
    let moves = board.empty_cells();
    if moves.is_empty() {
        return Err(GameError::NoLegalMove);
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("MINIMAX".parse::<Difficulty>().unwrap(), Difficulty::Minimax);
        assert_eq!("heuristic".parse::<Difficulty>().unwrap(), Difficulty::Heuristic);
        assert!("impossible".parse::<Difficulty>().is_err());
        let labels: Vec<String> = Difficulty::iter().map(|d| d.to_string()).collect();
        assert_eq!(labels, ["random", "heuristic", "minimax"]);
    }

    #[test]
    fn test_full_board_has_no_legal_move() {
        let board: Board = "XOX/OXX/OXO".parse().unwrap();
        assert_eq!(legal_moves(&board), Err(GameError::NoLegalMove));
    }
}
