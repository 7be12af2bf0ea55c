//! Parsing of typed player commands.

use derive_more::{Display, Error};
use solo_tictactoe::{BOARD_SIZE, Color, Difficulty, Mark, Move};
use std::str::FromStr;

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Play at a 0-based coordinate.
    Place {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },
    /// Start a new game.
    Reset,
    /// Change the computer's strategy.
    Difficulty(Difficulty),
    /// Change the human's mark.
    Mark(Mark),
    /// Change the human's colour.
    Color(Color),
    /// Show the board again.
    Board,
    /// Show the command list.
    Help,
    /// Leave the game.
    Quit,
}

/// Why a line of input was not understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    /// Blank line.
    #[display("Empty command")]
    Empty,
    /// First word is not a command.
    #[display("Unknown command '{command}', type 'help' for the list")]
    Unknown {
        /// The offending input.
        command: String,
    },
    /// Command argument could not be parsed.
    #[display("Expected {expected}, got '{got}'")]
    BadArgument {
        /// What the command accepts.
        expected: &'static str,
        /// What was typed.
        got: String,
    },
    /// Single cell number outside 1-9.
    #[display("Cell number must be between 1 and 9, got {value}")]
    CellNumber {
        /// The number typed.
        value: usize,
    },
}

/// Command summary shown by `help`.
pub const HELP: &str = "\
Commands:
  <row> <col>          play at a 0-based coordinate, e.g. '1 1' for the centre
  1-9                  play at a numbered cell, counted left to right, top to bottom
  reset | start over   start a new game
  difficulty <level>   random, heuristic or minimax (between games)
  mark <x|o>           choose your mark (between games)
  color <white|blue>   choose your colour
  board                show the board
  help                 show this list
  quit                 leave";

fn argument<T: FromStr>(word: &str, expected: &'static str) -> Result<T, InputError> {
    word.parse().map_err(|_| InputError::BadArgument {
        expected,
        got: word.to_string(),
    })
}

fn index(word: &str) -> Result<usize, InputError> {
    argument(word, "a cell index")
}

impl FromStr for UserCommand {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let lowered = line.trim().to_ascii_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        let command = match words.as_slice() {
            [] => return Err(InputError::Empty),
            ["reset"] | ["start", "over"] => UserCommand::Reset,
            ["difficulty", level] => {
                UserCommand::Difficulty(argument(level, "random, heuristic or minimax")?)
            }
            ["mark", mark] => UserCommand::Mark(argument(mark, "x or o")?),
            ["color" | "colour", color] => UserCommand::Color(argument(color, "white or blue")?),
            ["board"] => UserCommand::Board,
            ["help" | "?"] => UserCommand::Help,
            ["quit" | "exit" | "q"] => UserCommand::Quit,
            [row, col] if row.starts_with(|c: char| c.is_ascii_digit()) => UserCommand::Place {
                row: index(row)?,
                col: index(col)?,
            },
            [cell] if cell.starts_with(|c: char| c.is_ascii_digit()) => {
                let value = index(cell)?;
                if !(1..=BOARD_SIZE * BOARD_SIZE).contains(&value) {
                    return Err(InputError::CellNumber { value });
                }
                let mv = Move::from_index(value - 1).ok_or(InputError::CellNumber { value })?;
                UserCommand::Place {
                    row: mv.row(),
                    col: mv.col(),
                }
            }
            [first, ..] => {
                return Err(InputError::Unknown {
                    command: (*first).to_string(),
                });
            }
        };
        Ok(command)
    }
}
