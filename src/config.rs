use std::path::Path;

use crate::ai::LearnerConfig;
use crate::error::ConfigError;
use crate::training::trainer::TrainerConfig;

/// Minimax search configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { depth: 4 }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub learner: LearnerConfig,
    pub training: TrainerConfig,
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

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!(
                "config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.learner.learning_rate <= 0.0 || self.learner.learning_rate > 1.0 {
            return Err(ConfigError::Validation(
                "learner.learning_rate must be in (0, 1]".into(),
            ));
        }
        if self.learner.discount_factor < 0.0 || self.learner.discount_factor > 1.0 {
            return Err(ConfigError::Validation(
                "learner.discount_factor must be in [0, 1]".into(),
            ));
        }
        if self.learner.exploration < 0.0 || self.learner.exploration > 1.0 {
            return Err(ConfigError::Validation(
                "learner.exploration must be in [0, 1]".into(),
            ));
        }
        if self.learner.training_exploration < 0.0 || self.learner.training_exploration > 1.0 {
            return Err(ConfigError::Validation(
                "learner.training_exploration must be in [0, 1]".into(),
            ));
        }
        if self.training.num_episodes == 0 {
            return Err(ConfigError::Validation(
                "training.num_episodes must be > 0".into(),
            ));
        }
        if self.training.board_width == 0 || self.training.board_height == 0 {
            return Err(ConfigError::Validation(
                "training board dimensions must be > 0".into(),
            ));
        }
        if self.training.max_turns == 0 {
            return Err(ConfigError::Validation(
                "training.max_turns must be > 0".into(),
            ));
        }
        if self.training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }
        if self.training.eval_interval == 0 {
            return Err(ConfigError::Validation(
                "training.eval_interval must be > 0".into(),
            ));
        }
        if self.training.eval_games == 0 {
            return Err(ConfigError::Validation(
                "training.eval_games must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
