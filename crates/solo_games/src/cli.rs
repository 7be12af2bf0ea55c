//! Command-line interface for solo_games.

use crate::config::Overrides;
use clap::{Parser, Subcommand};
use solo_tictactoe::{Color, Difficulty, Mark};

/// Solo Games - tic-tac-toe against the computer
#[derive(Parser, Debug)]
#[command(name = "solo_games")]
#[command(about = "Play tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./solo.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Computer strategy: random, heuristic or minimax
    #[arg(short, long, global = true)]
    pub difficulty: Option<Difficulty>,

    /// Your mark: x or o
    #[arg(short, long, global = true)]
    pub mark: Option<Mark>,

    /// Your colour: white or blue
    #[arg(long, global = true)]
    pub color: Option<Color>,

    /// Computer thinking time in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Subcommand to run (defaults to play)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play interactively on the terminal
    Play,

    /// Pit the configured strategy against a random opponent
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Cli {
    /// Flag values that take precedence over the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            difficulty: self.difficulty,
            user_mark: self.mark,
            user_color: self.color,
            delay_ms: self.delay_ms,
        }
    }

    /// The requested command, `play` when none is given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play)
    }
}
