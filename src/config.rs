use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{LINE_LENGTH, MAX_CELLS};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub players: PlayersConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            height: 6,
            width: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub first: String,
    pub second: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            first: "red".to_string(),
            second: "yellow".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause between the final piece landing and the result being shown.
    pub announce_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            announce_delay_ms: 100,
        }
    }
}

impl UiConfig {
    pub fn announce_delay(&self) -> Duration {
        Duration::from_millis(self.announce_delay_ms)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values. Player colors are checked by
    /// [`crate::setup::validate_colors`] when the players are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.height < LINE_LENGTH {
            return Err(ConfigError::Validation(format!(
                "board.height must be >= {LINE_LENGTH}"
            )));
        }
        if self.board.width < LINE_LENGTH {
            return Err(ConfigError::Validation(format!(
                "board.width must be >= {LINE_LENGTH}"
            )));
        }
        if self
            .board
            .height
            .checked_mul(self.board.width)
            .is_none_or(|cells| cells > MAX_CELLS)
        {
            return Err(ConfigError::Validation(format!(
                "board.height * board.width must be <= {MAX_CELLS}"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
