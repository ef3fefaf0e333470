use std::path::PathBuf;

/// Errors raised by the board engine and the decision agents.
///
/// All of these are recoverable conditions meant to be caught at the driver
/// boundary (UI clicks on a full column, undo on a fresh board, and so on).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("column {0} is full or out of range")]
    InvalidMove(usize),

    #[error("the game has already finished")]
    GameFinished,

    #[error("no moves to undo")]
    EmptyHistory,

    #[error("no legal moves available")]
    NoMovesAvailable,
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

/// Errors that can occur while saving or loading a value table.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read value table from {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write value table to {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid table key '{0}'")]
    KeyParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        assert_eq!(
            GameError::InvalidMove(9).to_string(),
            "column 9 is full or out of range"
        );
        assert_eq!(
            GameError::GameFinished.to_string(),
            "the game has already finished"
        );
        assert_eq!(GameError::EmptyHistory.to_string(), "no moves to undo");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("learner.learning_rate must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: learner.learning_rate must be > 0"
        );
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::KeyParse("abc".to_string());
        assert_eq!(err.to_string(), "invalid table key 'abc'");
    }
}
