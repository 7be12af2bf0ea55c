//! Drives a game session from typed commands.
//!
//! The computer's reply is scheduled after a thinking delay instead of being
//! played at once. A reset drops the scheduled reply, and the session's epoch
//! check discards it even if it fires anyway.

use crate::input::{InputError, UserCommand};
use anyhow::Result;
use solo_tictactoe::{
    Board, ComputerReply, GameSession, GameStatus, MoveReport, PendingMove, Placement, Settings,
};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument, warn};

/// Messages sent from the host to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Board or status updated.
    BoardChanged {
        /// Current board.
        board: Board,
        /// Current status.
        status: GameStatus,
    },
    /// Computer is thinking.
    ComputerThinking,
    /// Move was made.
    MoveMade {
        /// Mark and cell.
        placement: Placement,
        /// True for the human's moves.
        by_user: bool,
    },
    /// Game ended.
    GameOver {
        /// Final status.
        status: GameStatus,
    },
    /// Difficulty, mark or colour changed.
    SettingsChanged(Settings),
    /// Command was not accepted.
    CommandRejected {
        /// Why.
        reason: String,
    },
    /// Command list requested.
    Help,
}

/// Whether the host keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Player asked to leave.
    Quit,
}

/// Terminal host for one game session.
#[derive(Debug)]
pub struct Host {
    session: GameSession,
    delay: Duration,
    scheduled: Option<(Instant, PendingMove)>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Host {
    /// Creates a host around `session`.
    pub fn new(
        session: GameSession,
        delay: Duration,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            delay,
            scheduled: None,
            event_tx,
        }
    }

    /// The underlying session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// When the scheduled computer move is due, if one is.
    pub fn deadline(&self) -> Option<Instant> {
        self.scheduled.map(|(due, _)| due)
    }

    /// Announces the settings and the board.
    pub fn announce(&self) -> Result<()> {
        self.event_tx
            .send(GameEvent::SettingsChanged(*self.session.settings()))?;
        self.send_board()
    }

    /// Parses and handles one line of input. Parse errors are reported as
    /// rejected commands.
    #[instrument(skip(self))]
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match line.parse::<UserCommand>() {
            Ok(command) => self.handle(command),
            Err(InputError::Empty) => Ok(Flow::Continue),
            Err(e) => {
                debug!(error = %e, "Unparsed input");
                self.reject(e.to_string())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Handles one command.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: UserCommand) -> Result<Flow> {
        match command {
            UserCommand::Place { row, col } => self.human_move(row, col)?,
            UserCommand::Reset => {
                self.scheduled = None;
                self.session.reset();
                self.send_board()?;
            }
            UserCommand::Difficulty(difficulty) => {
                match self.session.set_difficulty(difficulty) {
                    Ok(()) => self.send_settings()?,
                    Err(e) => self.reject(e.to_string())?,
                }
            }
            UserCommand::Mark(mark) => match self.session.set_user_mark(mark) {
                Ok(()) => {
                    self.send_settings()?;
                    self.send_board()?;
                }
                Err(e) => self.reject(e.to_string())?,
            },
            UserCommand::Color(color) => {
                self.session.set_user_color(color);
                self.send_settings()?;
            }
            UserCommand::Board => self.send_board()?,
            UserCommand::Help => self.event_tx.send(GameEvent::Help)?,
            UserCommand::Quit => {
                info!("Player quit");
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Plays the scheduled computer move, if any.
    #[instrument(skip(self))]
    pub fn fire(&mut self) -> Result<()> {
        let Some((_, ticket)) = self.scheduled.take() else {
            return Ok(());
        };

        match self.session.resolve_computer_move(ticket)? {
            ComputerReply::Applied(report) => self.send_move(&report, false)?,
            ComputerReply::Stale => debug!(?ticket, "Scheduled move was stale"),
        }
        Ok(())
    }

    /// Runs the input loop until `quit` or end of input.
    ///
    /// A computer move still scheduled at end of input is played before
    /// returning.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        info!("Starting game host");
        self.announce()?;
        let mut lines = input.lines();

        loop {
            let deadline = self.deadline();
            tokio::select! {
                biased;

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.fire()?;
                }
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if self.handle_line(&line)? == Flow::Quit {
                            return Ok(());
                        }
                    }
                    None => break,
                },
            }
        }

        debug!("Input closed");
        if let Some(due) = self.deadline() {
            sleep_until(due).await;
            self.fire()?;
        }
        Ok(())
    }

    fn human_move(&mut self, row: usize, col: usize) -> Result<()> {
        match self.session.apply_human_move(row, col) {
            Ok(report) => {
                self.send_move(&report, true)?;
                if let Some(ticket) = report.pending() {
                    self.scheduled = Some((Instant::now() + self.delay, *ticket));
                    self.event_tx.send(GameEvent::ComputerThinking)?;
                }
                Ok(())
            }
            Err(e) => self.reject(e.to_string()),
        }
    }

    fn send_move(&self, report: &MoveReport, by_user: bool) -> Result<()> {
        self.event_tx.send(GameEvent::MoveMade {
            placement: *report.placement(),
            by_user,
        })?;
        self.send_board()?;
        if report.status().is_terminal() {
            self.event_tx.send(GameEvent::GameOver {
                status: *report.status(),
            })?;
        }
        Ok(())
    }

    fn send_board(&self) -> Result<()> {
        self.event_tx.send(GameEvent::BoardChanged {
            board: *self.session.board(),
            status: self.session.status(),
        })?;
        Ok(())
    }

    fn send_settings(&self) -> Result<()> {
        self.event_tx
            .send(GameEvent::SettingsChanged(*self.session.settings()))?;
        Ok(())
    }

    fn reject(&self, reason: String) -> Result<()> {
        warn!(%reason, "Command rejected");
        self.event_tx.send(GameEvent::CommandRejected { reason })?;
        Ok(())
    }
}
