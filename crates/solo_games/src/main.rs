//! Solo Games - tic-tac-toe against the computer on the terminal.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use solo_games::{AppConfig, Cli, Command, Host, Renderer, drain, simulate};
use solo_tictactoe::{GameSession, Settings};
use std::io::IsTerminal;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), std::env::current_dir()?)?
        .with_overrides(cli.overrides());

    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command() {
        Command::Play => run_play(*config.game(), config.delay()).await,
        Command::Simulate { games, seed } => run_simulate(*config.game(), games, seed),
    }
}

/// Play interactively on stdin/stdout
#[instrument(skip(settings))]
async fn run_play(settings: Settings, delay: Duration) -> Result<()> {
    info!(difficulty = %settings.difficulty(), "Starting Solo Games");

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let stdout = std::io::stdout();
    let ansi = stdout.is_terminal();
    let renderer = tokio::spawn(drain(event_rx, Renderer::new(stdout).with_ansi(ansi)));

    let mut host = Host::new(GameSession::with_settings(settings), delay, event_tx);
    host.run(BufReader::new(tokio::io::stdin())).await?;

    // Closing the channel lets the renderer finish.
    drop(host);
    renderer.await??;
    Ok(())
}

/// Run a batch of games and print the tally
#[instrument(skip(settings))]
fn run_simulate(settings: Settings, games: usize, seed: Option<u64>) -> Result<()> {
    let tally = simulate(settings, games, seed)?;
    println!("{}", tally);
    Ok(())
}
