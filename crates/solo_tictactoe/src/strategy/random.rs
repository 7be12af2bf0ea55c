//! Uniformly random opponent.

use super::{Strategy, legal_moves};
use crate::action::Move;
use crate::error::GameError;
use crate::types::{Board, Mark};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;
use tracing::{debug, instrument};

/// Picks uniformly among the empty cells.
///
/// The random source is injectable so tests can seed it.
pub struct RandomStrategy {
    rng: Box<dyn RngCore + Send>,
}

impl RandomStrategy {
    /// Creates a strategy seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a deterministic strategy from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Creates a strategy drawing from the given random source.
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RandomStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomStrategy").finish_non_exhaustive()
    }
}

impl Strategy for RandomStrategy {
    #[instrument(skip(self))]
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<Move, GameError> {
        let moves = legal_moves(board)?;
        let choice = moves[self.rng.random_range(0..moves.len())];
        debug!(%mark, %choice, options = moves.len(), "Random move chosen");
        Ok(choice)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
