//! Player-facing configuration of a game session.

use crate::strategy::Difficulty;
use crate::types::Mark;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Display colour of a player's mark.
///
/// The human picks one and the computer gets the other.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Color {
    /// White marks.
    #[default]
    White,
    /// Blue marks.
    Blue,
}

impl Color {
    /// Returns the other colour.
    #[instrument]
    pub fn complement(self) -> Self {
        match self {
            Color::White => Color::Blue,
            Color::Blue => Color::White,
        }
    }
}

/// User-configurable settings for a game session.
///
/// Defaults match a fresh widget: random opponent, human plays `O` in white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which strategy the computer uses.
    difficulty: Difficulty,
    /// The human's mark; the computer plays the other one.
    user_mark: Mark,
    /// The human's colour; the computer uses the complement.
    user_color: Color,
}

impl Settings {
    /// Creates settings from explicit values.
    pub fn new(difficulty: Difficulty, user_mark: Mark, user_color: Color) -> Self {
        Self {
            difficulty,
            user_mark,
            user_color,
        }
    }

    /// Returns a copy with a different difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Returns a copy with a different user mark.
    pub fn with_user_mark(mut self, user_mark: Mark) -> Self {
        self.user_mark = user_mark;
        self
    }

    /// Returns a copy with a different user colour.
    pub fn with_user_color(mut self, user_color: Color) -> Self {
        self.user_color = user_color;
        self
    }

    /// The computer's mark.
    pub fn computer_mark(&self) -> Mark {
        self.user_mark.opponent()
    }

    /// The computer's colour.
    pub fn computer_color(&self) -> Color {
        self.user_color.complement()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Random,
            user_mark: Mark::O,
            user_color: Color::White,
        }
    }
}
