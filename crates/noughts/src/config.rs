//! Game configuration loaded from TOML.

use crate::cli::GameArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::Player;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player who opens every round.
    #[serde(default = "default_starting_player")]
    starting_player: Player,

    /// Whether the computer plays the second side.
    #[serde(default = "default_ai_enabled")]
    ai_enabled: bool,

    /// Pause before the computer answers, in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Log destination while the terminal UI is running.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_starting_player() -> Player {
    Player::Cross
}

fn default_ai_enabled() -> bool {
    true
}

fn default_ai_delay_ms() -> u64 {
    500
}

fn default_log_file() -> PathBuf {
    PathBuf::from("noughts_tui.log")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_player: default_starting_player(),
            ai_enabled: default_ai_enabled(),
            ai_delay_ms: default_ai_delay_ms(),
            log_file: default_log_file(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(starting_player = %config.starting_player, ai_enabled = config.ai_enabled, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads the file named by `args` and applies its overrides.
    #[instrument(skip(args), fields(config = %args.config.display()))]
    pub fn from_args(args: &GameArgs) -> Result<Self, ConfigError> {
        let mut config = Self::load(&args.config)?;
        if let Some(player) = args.starting_player {
            debug!(player = %player, "Overriding starting player");
            config.starting_player = player;
        }
        if args.no_ai {
            debug!("Disabling AI from command line");
            config.ai_enabled = false;
        }
        Ok(config)
    }

    /// Replaces the AI delay.
    pub fn with_ai_delay_ms(mut self, ms: u64) -> Self {
        self.ai_delay_ms = ms;
        self
    }

    /// Replaces the log file path.
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = path;
        self
    }

    /// Pause before the computer answers.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(config: PathBuf) -> GameArgs {
        GameArgs {
            config,
            starting_player: None,
            no_ai: false,
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.ai_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "starting_player = \"O\"\nai_delay_ms = 0").unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.starting_player(), Player::Circle);
        assert_eq!(*config.ai_delay_ms(), 0);
        assert!(*config.ai_enabled());
        assert_eq!(config.log_file(), &PathBuf::from("noughts_tui.log"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "starting_player = \"Z\"").unwrap();

        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_command_line_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "starting_player = \"X\"\nai_enabled = true").unwrap();

        let mut cli = args(file.path().to_path_buf());
        cli.starting_player = Some(Player::Circle);
        cli.no_ai = true;

        let config = GameConfig::from_args(&cli).unwrap();
        assert_eq!(*config.starting_player(), Player::Circle);
        assert!(!*config.ai_enabled());
    }
}
