//! Core domain types for tic-tac-toe.

use crate::action::Move;
use crate::error::{BoardParseError, GameError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// A player's symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Cross.
    X,
    /// Nought.
    O,
}

impl Mark {
    /// Returns the other player's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }

    fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Mark::X) => 'X',
            Square::Occupied(Mark::O) => 'O',
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are addressed by `(row, col)` with both in `0..3`. A cell, once
/// occupied, is never overwritten: [`Board::place`] rejects occupied targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a board from explicit rows.
    pub fn from_rows(squares: [[Square; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { squares }
    }

    /// Gets the square at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Square, GameError> {
        let mv = Move::checked(row, col)?;
        Ok(self.at(mv))
    }

    /// Checks if the square at `(row, col)` is empty.
    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool, GameError> {
        Ok(self.get(row, col)? == Square::Empty)
    }

    /// Places `mark` at `(row, col)`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for coordinates outside the board, `CellOccupied` if the
    /// cell already holds a mark. The board is unchanged on error.
    #[instrument(level = "trace", skip(self))]
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), GameError> {
        let mv = Move::checked(row, col)?;
        if self.at(mv) != Square::Empty {
            return Err(GameError::CellOccupied { row, col });
        }
        self.squares[row][col] = Square::Occupied(mark);
        Ok(())
    }

    /// Empty coordinates in row-major order.
    pub fn empty_cells(&self) -> Vec<Move> {
        Move::ALL
            .iter()
            .copied()
            .filter(|mv| self.at(*mv) == Square::Empty)
            .collect()
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.squares
            .iter()
            .flatten()
            .all(|sq| *sq != Square::Empty)
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|sq| **sq == Square::Occupied(mark))
            .count()
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.count(Mark::X) + self.count(Mark::O)
    }

    /// All squares, row by row.
    pub fn squares(&self) -> &[[Square; BOARD_SIZE]; BOARD_SIZE] {
        &self.squares
    }

    /// Square at an already validated coordinate.
    pub(crate) fn at(&self, mv: Move) -> Square {
        self.squares[mv.row()][mv.col()]
    }

    /// Copy of this board with `mark` at `mv`. The caller guarantees the cell is empty.
    pub(crate) fn with(mut self, mv: Move, mark: Mark) -> Self {
        debug_assert_eq!(self.at(mv), Square::Empty);
        self.squares[mv.row()][mv.col()] = Square::Occupied(mark);
        self
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.squares.iter().enumerate() {
            let line: Vec<String> = row.iter().map(|sq| sq.symbol().to_string()).collect();
            write!(f, "{}", line.join("|"))?;
            if r + 1 < BOARD_SIZE {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells in row-major order.
    ///
    /// `X`/`O` (any case) are marks, `.` and `_` are empty. Whitespace and the
    /// separators `/`, `|`, `-` and `+` are ignored, so the output of
    /// `Display` parses back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for ch in s.chars() {
            let square = match ch {
                'X' | 'x' => Square::Occupied(Mark::X),
                'O' | 'o' => Square::Occupied(Mark::O),
                '.' | '_' => Square::Empty,
                '/' | '|' | '-' | '+' => continue,
                c if c.is_whitespace() => continue,
                other => {
                    return Err(BoardParseError::new(format!(
                        "unexpected character {other:?}"
                    )));
                }
            };
            cells.push(square);
        }

        if cells.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(BoardParseError::new(format!(
                "expected 9 cells, found {}",
                cells.len()
            )));
        }

        let mut board = Board::empty();
        for (idx, square) in cells.into_iter().enumerate() {
            board.squares[idx / BOARD_SIZE][idx % BOARD_SIZE] = square;
        }
        Ok(board)
    }
}

/// Status of a game from the human player's point of view.
///
/// Always derived from the board; `Active` is the only non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    Active,
    /// The human completed a line.
    UserWin,
    /// The computer completed a line.
    ComputerWin,
    /// Board full with no line.
    Draw,
}

impl GameStatus {
    /// True for every status except `Active`.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Active
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "In progress"),
            GameStatus::UserWin => write!(f, "You win"),
            GameStatus::ComputerWin => write!(f, "Computer wins"),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}
