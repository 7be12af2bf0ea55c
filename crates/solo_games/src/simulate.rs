//! Batch games between the configured strategy and a random opponent.

use derive_getters::Getters;
use derive_more::Display;
use solo_tictactoe::{
    Difficulty, GameError, GameSession, GameStatus, RandomStrategy, Settings, Strategy,
};
use tracing::{debug, info, instrument};

/// Results of a batch of games, from the computer's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Display)]
#[display(
    "{} games vs random with {}: {} won, {} drawn, {} lost",
    games,
    difficulty,
    wins,
    draws,
    losses
)]
pub struct Tally {
    /// Strategy under test.
    difficulty: Difficulty,
    /// Games played.
    games: usize,
    /// Computer wins.
    wins: usize,
    /// Draws.
    draws: usize,
    /// Computer losses.
    losses: usize,
}

impl Tally {
    fn record(&mut self, status: GameStatus) {
        self.games += 1;
        match status {
            GameStatus::ComputerWin => self.wins += 1,
            GameStatus::UserWin => self.losses += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::Active => {}
        }
    }
}

/// Plays `games` games of `settings`' strategy against a uniformly random
/// opponent, which takes the human's seat and opens every game.
///
/// With a seed both sides' random choices are reproducible.
#[instrument]
pub fn simulate(settings: Settings, games: usize, seed: Option<u64>) -> Result<Tally, GameError> {
    let (computer_rng, mut opponent) = match seed {
        Some(seed) => (
            RandomStrategy::seeded(seed),
            RandomStrategy::seeded(seed.wrapping_add(1)),
        ),
        None => (RandomStrategy::new(), RandomStrategy::new()),
    };
    let mut session = GameSession::with_settings(settings).with_random(computer_rng);
    let mut tally = Tally {
        difficulty: *settings.difficulty(),
        ..Tally::default()
    };

    for game in 0..games {
        session.reset();
        while !session.status().is_terminal() {
            let mv = opponent.select_move(session.board(), session.user_mark())?;
            session.play_turn(mv.row(), mv.col())?;
        }
        debug!(game, status = ?session.status(), "Game finished");
        tally.record(session.status());
    }

    info!(%tally, "Simulation complete");
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimax_never_loses() {
        let settings = Settings::default().with_difficulty(Difficulty::Minimax);
        let tally = simulate(settings, 20, Some(7)).unwrap();

        assert_eq!(*tally.games(), 20);
        assert_eq!(*tally.losses(), 0);
        assert_eq!(tally.wins() + tally.draws(), 20);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let settings = Settings::default();
        assert_eq!(
            simulate(settings, 30, Some(42)).unwrap(),
            simulate(settings, 30, Some(42)).unwrap()
        );
    }

    #[test]
    fn test_zero_games() {
        let tally = simulate(Settings::default(), 0, Some(1)).unwrap();
        assert_eq!(tally, Tally {
            difficulty: Difficulty::Random,
            ..Tally::default()
        });
    }

    #[test]
    fn test_display() {
        let tally = Tally {
            difficulty: Difficulty::Heuristic,
            games: 3,
            wins: 1,
            draws: 1,
            losses: 1,
        };
        assert_eq!(
            tally.to_string(),
            "3 games vs random with heuristic: 1 won, 1 drawn, 1 lost"
        );
    }
}
