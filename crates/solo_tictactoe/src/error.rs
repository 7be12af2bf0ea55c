//! Error types for the tic-tac-toe engine.

use derive_more::{Display, Error};

/// Error returned when a move, strategy call or configuration change is rejected.
///
/// None of these are fatal: a host reports them to the player and carries on.
/// Wins and draws are statuses, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Coordinate outside `0..3`.
    #[display("Coordinate ({row}, {col}) is outside the 3x3 board")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a mark.
    #[display("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Row of the occupied cell.
        row: usize,
        /// Column of the occupied cell.
        col: usize,
    },

    /// A move was attempted after the game reached a terminal status.
    #[display("Game is already over")]
    GameOver,

    /// A strategy was asked for a move on a full board.
    #[display("No legal move: the board is full")]
    NoLegalMove,

    /// The human tried to move while the computer's reply is outstanding.
    #[display("It's the computer's turn")]
    NotYourTurn,

    /// A configuration change or setup request that is not allowed right now.
    #[display("Invalid operation: {reason}")]
    InvalidOperation {
        /// Why the operation was refused.
        reason: &'static str,
    },
}

/// Error parsing a board from its compact text form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board text: {message}")]
pub struct BoardParseError {
    /// What was wrong with the input.
    pub message: String,
}

impl BoardParseError {
    /// Creates a new parse error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
