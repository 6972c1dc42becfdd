use std::path::PathBuf;

/// A move the engine rejected. The board is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("the game is already over")]
    GameOver,

    #[error("column {column} is outside the board (width {width})")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// A game that could not be created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSetup {
    #[error("a {height}x{width} board is too small for four in a row (minimum 4x4)")]
    BoardTooSmall { height: usize, width: usize },

    #[error("a {height}x{width} board has more than {max} cells", max = crate::game::MAX_CELLS)]
    BoardTooLarge { height: usize, width: usize },

    #[error("both players chose the color '{color}'")]
    DuplicatePlayers { color: String },
}

/// Color choices rejected by the setup form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    // Two empty fields are reported as a clash, matching the setup form.
    #[error("Colors cannot be the same.")]
    BothEmpty,

    #[error("Player 1, please choose a color.")]
    FirstEmpty,

    #[error("Player 2, please choose a color.")]
    SecondEmpty,

    #[error("Please choose two different colors.")]
    SameColor,

    #[error("Please choose two valid colors.")]
    BothInvalid,

    #[error("Player 1, please choose a valid color.")]
    FirstInvalid,

    #[error("Player 2, please choose a valid color.")]
    SecondInvalid,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
