//! Moves and placements.
//!
//! A [`Move`] is only a coordinate; a [`Placement`] records which mark went
//! there. Both are plain values that can be logged, compared and serialized.

use crate::error::GameError;
use crate::types::{BOARD_SIZE, Mark};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, col)` coordinate on the board, both in `0..3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// All nine coordinates in row-major order.
    pub const ALL: [Move; 9] = [
        Move::new(0, 0),
        Move::new(0, 1),
        Move::new(0, 2),
        Move::new(1, 0),
        Move::new(1, 1),
        Move::new(1, 2),
        Move::new(2, 0),
        Move::new(2, 1),
        Move::new(2, 2),
    ];

    /// Creates a move without validation. Only for in-range constants.
    pub(crate) const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Creates a move, rejecting coordinates outside the board.
    pub fn checked(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    /// Creates a move from a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Row of the target cell.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column of the target cell.
    pub fn col(self) -> usize {
        self.col
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A mark placed at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, new, Serialize, Deserialize)]
pub struct Placement {
    /// Who moved.
    mark: Mark,
    /// Where.
    at: Move,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.mark, self.at)
    }
}
