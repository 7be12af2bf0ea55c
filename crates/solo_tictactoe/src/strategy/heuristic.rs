//! One-ply "block-or-win" opponent.

use super::{Strategy, legal_moves};
use crate::action::Move;
use crate::error::GameError;
use crate::rules::winner;
use crate::types::{Board, Mark};
use tracing::{debug, instrument};

/// Takes an immediate win, otherwise blocks an immediate loss, otherwise
/// plays the first empty cell in row-major order.
///
/// Looks exactly one move ahead: forks and slower traps go unnoticed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }
}

/// First empty cell where `mark` completes a line.
fn winning_cell(board: &Board, moves: &[Move], mark: Mark) -> Option<Move> {
    moves
        .iter()
        .copied()
        .find(|mv| winner(&board.with(*mv, mark)) == Some(mark))
}

impl Strategy for HeuristicStrategy {
    #[instrument(skip(self))]
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move, GameError> {
        let moves = legal_moves(board)?;

        if let Some(mv) = winning_cell(board, &moves, mark) {
            debug!(%mark, %mv, "Taking the win");
            return Ok(mv);
        }

        if let Some(mv) = winning_cell(board, &moves, mark.opponent()) {
            debug!(%mark, %mv, "Blocking opponent");
            return Ok(mv);
        }

        let mv = moves[0];
        debug!(%mark, %mv, "No threats, first empty cell");
        Ok(mv)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
