//! Host configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use solo_tictactoe::{Color, Difficulty, Mark, Settings};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "solo.toml";

/// Configuration for the terminal host.
///
/// ```toml
/// delay_ms = 250
/// log_filter = "solo_games=info"
///
/// [game]
/// difficulty = "minimax"
/// user_mark = "X"
/// user_color = "blue"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Computer thinking time in milliseconds.
    #[serde(default = "default_delay_ms")]
    delay_ms: u64,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Initial game settings.
    #[serde(default)]
    game: Settings,
}

#[instrument]
fn default_delay_ms() -> u64 {
    250
}

#[instrument]
fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            log_filter: default_log_filter(),
            game: Settings::default(),
        }
    }
}

/// Command-line values that replace their config file counterparts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Computer strategy.
    pub difficulty: Option<Difficulty>,
    /// The human's mark.
    pub user_mark: Option<Mark>,
    /// The human's colour.
    pub user_color: Option<Color>,
    /// Computer thinking time in milliseconds.
    pub delay_ms: Option<u64>,
}

impl AppConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(difficulty = %config.game.difficulty(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] from `dir` if it
    /// exists, else the defaults.
    ///
    /// An explicit path that cannot be read is an error.
    #[instrument(skip(path, dir))]
    pub fn load(path: Option<&Path>, dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let fallback = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::from_file(fallback)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(difficulty) = overrides.difficulty {
            self.game = self.game.with_difficulty(difficulty);
        }
        if let Some(mark) = overrides.user_mark {
            self.game = self.game.with_user_mark(mark);
        }
        if let Some(color) = overrides.user_color {
            self.game = self.game.with_user_color(color);
        }
        if let Some(delay_ms) = overrides.delay_ms {
            self.delay_ms = delay_ms;
        }
        self
    }

    /// Computer thinking time.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
