//! Perfect-play opponent using exhaustive game-tree search.

use super::{Strategy, legal_moves};
use crate::action::Move;
use crate::error::GameError;
use crate::rules::{is_full, winner};
use crate::types::{Board, Mark};
use tracing::{debug, instrument, trace};

/// Score of a win on the spot. Results further down the tree are discounted
/// by depth, so faster wins and slower losses score better.
const WIN: i32 = 10;

/// Bound outside every reachable score.
const INF: i32 = WIN + 1;

/// Minimax search with alpha-beta pruning.
///
/// Never chooses a losing move while a drawing or winning one exists and never
/// misses a forced win. Among equally scored moves the lowest row-major
/// coordinate is chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxStrategy;

impl MinimaxStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    /// Exact minimax value of every legal move for `mark`, in row-major order.
    ///
    /// Positive values are wins for `mark`, negative values losses, zero a draw
    /// under perfect play.
    #[instrument(skip(self))]
    pub fn score_moves(&self, board: &Board, mark: Mark) -> Result<Vec<(Move, i32)>, GameError> {
        let mut nodes = 0u64;
        let scored = legal_moves(board)?
            .into_iter()
            .map(|mv| {
                let next = board.with(mv, mark);
                (mv, search(&next, mark.opponent(), mark, 1, -INF, INF, &mut nodes))
            })
            .collect();
        trace!(nodes, "Scored all moves");
        Ok(scored)
    }
}

/// Value of `board` for `me` with `to_move` about to play.
fn search(
    board: &Board,
    to_move: Mark,
    me: Mark,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if let Some(mark) = winner(board) {
        return if mark == me { WIN - depth } else { depth - WIN };
    }
    if is_full(board) {
        return 0;
    }

    let maximizing = to_move == me;
    let mut best = if maximizing { -INF } else { INF };
    for mv in board.empty_cells() {
        let score = search(
            &board.with(mv, to_move),
            to_move.opponent(),
            me,
            depth + 1,
            alpha,
            beta,
            nodes,
        );
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

impl Strategy for MinimaxStrategy {
    #[instrument(skip(self))]
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move, GameError> {
        let moves = legal_moves(board)?;
        let mut nodes = 0u64;
        let mut alpha = -INF;
        let mut best: Option<Move> = None;

        for mv in moves {
            let score = search(
                &board.with(mv, mark),
                mark.opponent(),
                mark,
                1,
                alpha,
                INF,
                &mut nodes,
            );
            // Strictly greater keeps the earliest move among equals.
            if best.is_none() || score > alpha {
                best = Some(mv);
                alpha = score;
            }
        }

        let choice = best.ok_or(GameError::NoLegalMove)?;
        debug!(%mark, %choice, score = alpha, nodes, "Minimax move chosen");
        Ok(choice)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}
