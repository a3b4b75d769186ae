use std::path::PathBuf;

use crate::game::GameStatus;

/// A rejected move. The game is left untouched when one of these is returned,
/// so the caller can simply wait for another input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is outside the board (width {width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("game is already over: {status}")]
    GameOver { status: GameStatus },
}

/// Errors that can occur when rebuilding a game from a [`GameRecord`].
///
/// [`GameRecord`]: crate::game::GameRecord
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("board of {width}x{height} cells is too large")]
    InvalidDimensions { width: usize, height: usize },

    #[error("move {index} (column {column}) was rejected: {source}")]
    IllegalMove {
        index: usize,
        column: usize,
        source: MoveError,
    },
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
