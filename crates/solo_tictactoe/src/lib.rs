//! Solo tic-tac-toe engine - one human against the computer.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 grid, marks and moves
//! - **Rules**: win, draw and status evaluation
//! - **Strategies**: random, heuristic (block-or-win) and minimax opponents
//! - **Session**: turn order, configuration and the epoch-guarded computer reply
//!
//! # Example
//!
//! ```
//! use solo_tictactoe::{ComputerReply, Difficulty, GameSession, GameStatus};
//!
//! # fn example() -> Result<(), solo_tictactoe::GameError> {
//! let mut session = GameSession::new();
//! session.set_difficulty(Difficulty::Minimax)?;
//!
//! let report = session.apply_human_move(1, 1)?;
//! if let Some(ticket) = report.pending() {
//!     // A host would wait a moment here before resolving the ticket.
//!     if let ComputerReply::Applied(reply) = session.resolve_computer_move(*ticket)? {
//!         assert_eq!(*reply.status(), GameStatus::Active);
//!     }
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
mod rules;
mod session;
mod settings;
mod strategy;
mod types;

pub use action::{Move, Placement};
pub use error::{BoardParseError, GameError};
pub use rules::{LINES, is_full, status, winner, winner_after};
pub use session::{ComputerReply, GameSession, MoveReport, PendingMove, Turn};
pub use settings::{Color, Settings};
pub use strategy::{
    Difficulty, HeuristicStrategy, MinimaxStrategy, RandomStrategy, Strategy,
};
pub use types::{BOARD_SIZE, Board, GameStatus, Mark, Square};
