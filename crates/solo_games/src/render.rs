//! Text rendering of game events.

use crate::host::GameEvent;
use crate::input::HELP;
use solo_tictactoe::{BOARD_SIZE, Board, Color, Mark, Settings, Square};
use std::io::{self, Write};
use tokio::sync::mpsc;
use tracing::debug;

const ANSI_BLUE: &str = "\x1b[1;34m";
const ANSI_WHITE: &str = "\x1b[1;97m";
const ANSI_RESET: &str = "\x1b[0m";

/// Writes game events as text.
///
/// Empty cells show their cell number so the player can type it.
#[derive(Debug)]
pub struct Renderer<W> {
    out: W,
    settings: Settings,
    ansi: bool,
}

impl<W: Write> Renderer<W> {
    /// Creates a plain-text renderer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            settings: Settings::default(),
            ansi: false,
        }
    }

    /// Enables or disables ANSI colours for marks.
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Consumes the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes one event.
    pub fn render(&mut self, event: &GameEvent) -> io::Result<()> {
        match event {
            GameEvent::BoardChanged { board, status } => {
                self.write_board(board)?;
                writeln!(self.out, "{}", status)?;
            }
            GameEvent::ComputerThinking => writeln!(self.out, "Computer is thinking...")?,
            GameEvent::MoveMade { placement, by_user } => {
                let who = if *by_user { "You" } else { "Computer" };
                writeln!(
                    self.out,
                    "{} played {} at {}",
                    who,
                    self.paint(*placement.mark()),
                    placement.at()
                )?;
            }
            GameEvent::GameOver { status } => {
                writeln!(self.out, "Game over: {}. Type 'reset' to play again.", status)?
            }
            GameEvent::SettingsChanged(settings) => {
                self.settings = *settings;
                writeln!(
                    self.out,
                    "Difficulty: {} | You: {} ({}) | Computer: {} ({})",
                    settings.difficulty(),
                    settings.user_mark(),
                    settings.user_color(),
                    settings.computer_mark(),
                    settings.computer_color()
                )?;
            }
            GameEvent::CommandRejected { reason } => writeln!(self.out, "! {}", reason)?,
            GameEvent::Help => writeln!(self.out, "{}", HELP)?,
        }
        self.out.flush()
    }

    fn write_board(&mut self, board: &Board) -> io::Result<()> {
        for (row, cells) in board.squares().iter().enumerate() {
            if row > 0 {
                writeln!(self.out, "---+---+---")?;
            }
            let line: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(col, square)| match square {
                    Square::Empty => format!(" {} ", row * BOARD_SIZE + col + 1),
                    Square::Occupied(mark) => format!(" {} ", self.paint(*mark)),
                })
                .collect();
            writeln!(self.out, "{}", line.join("|"))?;
        }
        Ok(())
    }

    fn paint(&self, mark: Mark) -> String {
        if !self.ansi {
            return mark.to_string();
        }
        let color = if mark == *self.settings.user_mark() {
            *self.settings.user_color()
        } else {
            self.settings.computer_color()
        };
        let code = match color {
            Color::White => ANSI_WHITE,
            Color::Blue => ANSI_BLUE,
        };
        format!("{}{}{}", code, mark, ANSI_RESET)
    }
}

/// Renders events until every sender is dropped.
pub async fn drain<W: Write>(
    mut event_rx: mpsc::UnboundedReceiver<GameEvent>,
    mut renderer: Renderer<W>,
) -> io::Result<Renderer<W>> {
    while let Some(event) = event_rx.recv().await {
        renderer.render(&event)?;
    }
    debug!("Event channel closed");
    Ok(renderer)
}
