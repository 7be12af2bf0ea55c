//! Game session: one human against the computer.
//!
//! The session owns the board and the settings. Status and turn order are
//! always derived from the board (the human opens every game), never stored.
//!
//! The computer's reply is two-phase. [`GameSession::apply_human_move`] returns
//! a [`PendingMove`] ticket and the host resolves it later with
//! [`GameSession::resolve_computer_move`], typically after a short delay. Every
//! [`GameSession::reset`] starts a new epoch, so a ticket issued before the
//! reset resolves to [`ComputerReply::Stale`] and never touches the new board.

use crate::action::{Move, Placement};
use crate::error::GameError;
use crate::rules;
use crate::settings::{Color, Settings};
use crate::strategy::{
    Difficulty, HeuristicStrategy, MinimaxStrategy, RandomStrategy, Strategy,
};
use crate::types::{Board, GameStatus, Mark, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Ticket for a computer reply that is due.
///
/// Only valid for the epoch and board ply it was issued at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct PendingMove {
    /// Session epoch at issue time.
    epoch: u64,
    /// Number of occupied cells at issue time.
    ply: usize,
}

/// What happened after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MoveReport {
    /// The move that was applied.
    placement: Placement,
    /// Status after the move.
    status: GameStatus,
    /// Ticket for the computer's reply, if one is now due.
    pending: Option<PendingMove>,
}

/// Result of resolving a [`PendingMove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputerReply {
    /// The computer moved.
    Applied(MoveReport),
    /// The ticket was superseded by a reset or an earlier resolution.
    Stale,
}

/// A human move together with the computer's immediate answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Turn {
    /// The human's move.
    human: MoveReport,
    /// The computer's reply, absent when the human's move ended the game.
    computer: Option<MoveReport>,
}

/// A single-player game against the computer.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    settings: Settings,
    random: RandomStrategy,
    epoch: u64,
}

impl GameSession {
    /// Creates a session with default settings and an OS-seeded random opponent.
    #[instrument]
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// Creates a session with the given settings.
    #[instrument]
    pub fn with_settings(settings: Settings) -> Self {
        info!(?settings, "Creating game session");
        Self {
            board: Board::empty(),
            settings,
            random: RandomStrategy::new(),
            epoch: 0,
        }
    }

    /// Replaces the random opponent's source of randomness.
    pub fn with_random(mut self, random: RandomStrategy) -> Self {
        self.random = random;
        self
    }

    /// Resumes a game from `board`.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if the piece counts cannot come from alternating
    /// play with the human moving first.
    #[instrument]
    pub fn resume(board: Board, settings: Settings) -> Result<Self, GameError> {
        let user = board.count(*settings.user_mark());
        let computer = board.count(settings.computer_mark());
        if user != computer && user != computer + 1 {
            warn!(user, computer, "Rejecting board with impossible piece counts");
            return Err(GameError::InvalidOperation {
                reason: "board piece counts do not match human-first alternating play",
            });
        }
        let mut session = Self::with_settings(settings);
        session.board = board;
        Ok(session)
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current status, derived from the board.
    pub fn status(&self) -> GameStatus {
        rules::status(&self.board, *self.settings.user_mark())
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Configured difficulty.
    pub fn difficulty(&self) -> Difficulty {
        *self.settings.difficulty()
    }

    /// The human's mark.
    pub fn user_mark(&self) -> Mark {
        *self.settings.user_mark()
    }

    /// The computer's mark.
    pub fn computer_mark(&self) -> Mark {
        self.settings.computer_mark()
    }

    /// The human's colour.
    pub fn user_color(&self) -> Color {
        *self.settings.user_color()
    }

    /// The computer's colour.
    pub fn computer_color(&self) -> Color {
        self.settings.computer_color()
    }

    /// Epoch counter, bumped on every reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True while the game is active and the computer owes a reply.
    pub fn is_computer_turn(&self) -> bool {
        self.status() == GameStatus::Active
            && self.board.count(self.user_mark()) > self.board.count(self.computer_mark())
    }

    /// Ticket for the computer's reply, if one is due.
    pub fn pending_computer_move(&self) -> Option<PendingMove> {
        self.is_computer_turn().then(|| PendingMove {
            epoch: self.epoch,
            ply: self.board.occupied(),
        })
    }

    /// Places the human's mark at `(row, col)`.
    ///
    /// If the game is still active afterwards, the report carries the ticket
    /// for the computer's reply.
    ///
    /// # Errors
    ///
    /// `GameOver` once the game has ended, `NotYourTurn` while a computer reply
    /// is outstanding, and `OutOfRange` or `CellOccupied` from the board.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn apply_human_move(&mut self, row: usize, col: usize) -> Result<MoveReport, GameError> {
        if self.status().is_terminal() {
            warn!("Move rejected: game is over");
            return Err(GameError::GameOver);
        }
        if self.is_computer_turn() {
            warn!("Move rejected: waiting for the computer");
            return Err(GameError::NotYourTurn);
        }

        let mark = self.user_mark();
        self.board
            .place(row, col, mark)
            .inspect_err(|e| warn!(error = %e, "Invalid move"))?;

        let placement = Placement::new(mark, Move::checked(row, col)?);
        let report = self.report(placement);
        info!(%placement, status = ?report.status, "Human moved");
        Ok(report)
    }

    /// Resolves a computer reply ticket.
    ///
    /// Tickets from an earlier epoch, or already resolved, yield
    /// [`ComputerReply::Stale`] and leave the board untouched.
    ///
    /// # Errors
    ///
    /// Propagates strategy errors, which cannot occur for a current ticket.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn resolve_computer_move(&mut self, ticket: PendingMove) -> Result<ComputerReply, GameError> {
        if self.pending_computer_move() != Some(ticket) {
            warn!(?ticket, "Discarding stale computer move");
            return Ok(ComputerReply::Stale);
        }

        let mark = self.computer_mark();
        let board = self.board;
        let mv = match self.difficulty() {
            Difficulty::Random => self.random.select_move(&board, mark)?,
            Difficulty::Heuristic => HeuristicStrategy.select_move(&board, mark)?,
            Difficulty::Minimax => MinimaxStrategy.select_move(&board, mark)?,
        };
        self.board.place(mv.row(), mv.col(), mark)?;

        let placement = Placement::new(mark, mv);
        let report = self.report(placement);
        info!(%placement, status = ?report.status, difficulty = %self.difficulty(), "Computer moved");
        Ok(ComputerReply::Applied(report))
    }

    /// Human move followed immediately by the computer's reply.
    ///
    /// For hosts that don't simulate thinking time.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn play_turn(&mut self, row: usize, col: usize) -> Result<Turn, GameError> {
        let human = self.apply_human_move(row, col)?;
        let computer = match human.pending {
            Some(ticket) => match self.resolve_computer_move(ticket)? {
                ComputerReply::Applied(report) => Some(report),
                ComputerReply::Stale => None,
            },
            None => None,
        };
        Ok(Turn { human, computer })
    }

    /// Starts a new game: empty board, new epoch. Settings are kept.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn reset(&mut self) {
        self.board = Board::empty();
        self.epoch += 1;
        info!(epoch = self.epoch, "New game");
    }

    /// Changes the computer's strategy.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` while a game is under way.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        self.ensure_between_games()?;
        self.settings = self.settings.with_difficulty(difficulty);
        debug!(%difficulty, "Difficulty changed");
        Ok(())
    }

    /// Changes the human's mark; the computer takes the other one.
    ///
    /// Pieces of a finished game are relabelled so every cell keeps its owner
    /// and the result stands.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` while a game is under way.
    #[instrument(skip(self))]
    pub fn set_user_mark(&mut self, mark: Mark) -> Result<(), GameError> {
        self.ensure_between_games()?;
        if mark != self.user_mark() {
            self.board = swap_marks(&self.board);
            self.settings = self.settings.with_user_mark(mark);
            debug!(%mark, "User mark changed");
        }
        Ok(())
    }

    /// Changes the human's colour. Cosmetic, allowed at any time.
    #[instrument(skip(self))]
    pub fn set_user_color(&mut self, color: Color) {
        self.settings = self.settings.with_user_color(color);
        debug!(%color, "User colour changed");
    }

    fn report(&self, placement: Placement) -> MoveReport {
        let status = self.status();
        if status.is_terminal() {
            info!(?status, "Game over");
        }
        MoveReport {
            placement,
            status,
            pending: self.pending_computer_move(),
        }
    }

    fn ensure_between_games(&self) -> Result<(), GameError> {
        if self.status() == GameStatus::Active && self.board.occupied() > 0 {
            warn!("Settings change rejected mid-game");
            return Err(GameError::InvalidOperation {
                reason: "settings can only change between games",
            });
        }
        Ok(())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy of `board` with every X turned into O and vice versa.
fn swap_marks(board: &Board) -> Board {
    let squares = (*board.squares()).map(|row| {
        row.map(|sq| match sq {
            Square::Empty => Square::Empty,
            Square::Occupied(mark) => Square::Occupied(mark.opponent()),
        })
    });
    Board::from_rows(squares)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(difficulty: Difficulty) -> GameSession {
        GameSession::with_settings(Settings::default().with_difficulty(difficulty))
            .with_random(RandomStrategy::seeded(11))
    }

    #[test]
    fn test_human_move_issues_ticket() {
        let mut game = session(Difficulty::Heuristic);
        let report = game.apply_human_move(0, 0).unwrap();
        assert_eq!(*report.placement(), Placement::new(Mark::O, Move::new(0, 0)));
        assert_eq!(*report.status(), GameStatus::Active);
        assert_eq!(*report.pending(), Some(PendingMove { epoch: 0, ply: 1 }));
        assert!(game.is_computer_turn());
    }

    #[test]
    fn test_human_cannot_move_twice() {
        let mut game = session(Difficulty::Random);
        game.apply_human_move(0, 0).unwrap();
        assert_eq!(game.apply_human_move(1, 1), Err(GameError::NotYourTurn));
    }

    #[test]
    fn test_ticket_is_single_use() {
        let mut game = session(Difficulty::Heuristic);
        let ticket = game.apply_human_move(0, 0).unwrap().pending.unwrap();
        assert!(matches!(
            game.resolve_computer_move(ticket),
            Ok(ComputerReply::Applied(_))
        ));
        assert_eq!(game.resolve_computer_move(ticket), Ok(ComputerReply::Stale));
        assert_eq!(game.board().occupied(), 2);
    }

    #[test]
    fn test_reset_makes_ticket_stale() {
        let mut game = session(Difficulty::Minimax);
        let ticket = game.apply_human_move(1, 1).unwrap().pending.unwrap();
        game.reset();
        assert_eq!(game.resolve_computer_move(ticket), Ok(ComputerReply::Stale));
        assert_eq!(*game.board(), Board::empty());
        assert_eq!(game.epoch(), 1);
    }

    #[test]
    fn test_settings_locked_mid_game() {
        let mut game = session(Difficulty::Random);
        game.set_difficulty(Difficulty::Minimax).unwrap();
        game.play_turn(0, 0).unwrap();
        assert!(matches!(
            game.set_difficulty(Difficulty::Heuristic),
            Err(GameError::InvalidOperation { .. })
        ));
        assert!(matches!(
            game.set_user_mark(Mark::X),
            Err(GameError::InvalidOperation { .. })
        ));
        game.set_user_color(Color::Blue);
        assert_eq!(game.computer_color(), Color::White);
    }

    #[test]
    fn test_mark_swap_keeps_finished_result() {
        let board: Board = "OOO/XX./...".parse().unwrap();
        let mut game = GameSession::resume(board, Settings::default()).unwrap();
        assert_eq!(game.status(), GameStatus::UserWin);
        game.set_user_mark(Mark::X).unwrap();
        assert_eq!(game.user_mark(), Mark::X);
        assert_eq!(game.computer_mark(), Mark::O);
        assert_eq!(game.status(), GameStatus::UserWin);
        assert_eq!(game.board().get(0, 0), Ok(Square::Occupied(Mark::X)));
    }

    #[test]
    fn test_resume_rejects_impossible_counts() {
        let board: Board = "XX./.../...".parse().unwrap();
        assert!(matches!(
            GameSession::resume(board, Settings::default()),
            Err(GameError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_resume_with_computer_to_move() {
        let board: Board = "O../.../...".parse().unwrap();
        let game = GameSession::resume(board, Settings::default()).unwrap();
        assert!(game.is_computer_turn());
        assert!(game.pending_computer_move().is_some());
    }
}
