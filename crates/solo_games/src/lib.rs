//! Solo Games library - terminal host for tic-tac-toe against the computer
//!
//! # Architecture
//!
//! - **Config**: TOML file plus command-line overrides
//! - **Input**: typed commands such as `1 1`, `5` or `reset`
//! - **Host**: input loop with the delayed, cancellable computer reply
//! - **Render**: text output of host events
//! - **Simulate**: batch games against a random opponent
//!
//! # Example
//!
//! ```no_run
//! use solo_games::{AppConfig, Host, Renderer, drain};
//! use solo_tictactoe::GameSession;
//! use tokio::io::BufReader;
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::default();
//! let (event_tx, event_rx) = mpsc::unbounded_channel();
//! let renderer = tokio::spawn(drain(event_rx, Renderer::new(std::io::stdout())));
//!
//! let mut host = Host::new(GameSession::with_settings(*config.game()), config.delay(), event_tx);
//! host.run(BufReader::new(tokio::io::stdin())).await?;
//! drop(host);
//! renderer.await??;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod host;
mod input;
mod render;
mod simulate;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE, Overrides};

// Crate-level exports - Host loop
pub use host::{Flow, GameEvent, Host};

// Crate-level exports - Input parsing
pub use input::{HELP, InputError, UserCommand};

// Crate-level exports - Rendering
pub use render::{Renderer, drain};

// Crate-level exports - Simulation
pub use simulate::{Tally, simulate};
