//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! minimax_depth = 3
//! mcts_iterations = 2000
//! exploration = 1.4142
//! rollout_cap = 60
//! neighbor_radius = 2
//! seed = 42
//! move_generation = "prioritized"
//! ```
//!
//! Missing keys fall back to [`EngineConfig::default`].

use std::path::{Path, PathBuf};

use crate::search::{MoveGeneration, DEFAULT_EXPLORATION, DEFAULT_RADIUS, DEFAULT_ROLLOUT_CAP};

/// Default minimax depth
pub const DEFAULT_DEPTH: u8 = 3;

/// Default MCTS iterations
pub const DEFAULT_ITERATIONS: u32 = 2000;

/// Default random seed
pub const DEFAULT_SEED: u64 = 42;

/// Deepest minimax search accepted from config
pub const MAX_DEPTH: u8 = 10;

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

/// Search budgets and tuning knobs for [`AIEngine`](crate::engine::AIEngine).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimax plies when a request gives no depth
    pub minimax_depth: u8,
    /// MCTS iterations when a request gives none
    pub mcts_iterations: u32,
    /// UCT exploration constant
    pub exploration: f64,
    /// Maximum plies per MCTS rollout
    pub rollout_cap: u32,
    /// Chebyshev radius for neighborhood candidates
    pub neighbor_radius: i32,
    /// MCTS random seed
    pub seed: u64,
    /// Minimax candidate generation
    pub move_generation: MoveGeneration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            minimax_depth: DEFAULT_DEPTH,
            mcts_iterations: DEFAULT_ITERATIONS,
            exploration: DEFAULT_EXPLORATION,
            rollout_cap: DEFAULT_ROLLOUT_CAP,
            neighbor_radius: DEFAULT_RADIUS,
            seed: DEFAULT_SEED,
            move_generation: MoveGeneration::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimax_depth == 0 || self.minimax_depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "minimax_depth must be in [1, {MAX_DEPTH}]"
            )));
        }
        if self.mcts_iterations == 0 {
            return Err(ConfigError::Validation(
                "mcts_iterations must be > 0".into(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration <= 0.0 {
            return Err(ConfigError::Validation(
                "exploration must be a positive number".into(),
            ));
        }
        if self.rollout_cap == 0 {
            return Err(ConfigError::Validation(
                "rollout_cap must be > 0".into(),
            ));
        }
        if !(1..=4).contains(&self.neighbor_radius) {
            return Err(ConfigError::Validation(
                "neighbor_radius must be in [1, 4]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.minimax_depth, 3);
        assert_eq!(config.mcts_iterations, 2000);
        assert_eq!(config.rollout_cap, 60);
        assert_eq!(config.neighbor_radius, 2);
        assert!((config.exploration - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml("minimax_depth = 4\nseed = 7\n").unwrap();
        assert_eq!(config.minimax_depth, 4);
        assert_eq!(config.seed, 7);
        assert_eq!(config.mcts_iterations, DEFAULT_ITERATIONS);
        assert_eq!(config.move_generation, MoveGeneration::Prioritized);
    }

    #[test]
    fn test_move_generation_from_toml() {
        let config = EngineConfig::from_toml("move_generation = \"neighborhood\"").unwrap();
        assert_eq!(config.move_generation, MoveGeneration::Neighborhood);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig {
            seed: 99,
            rollout_cap: 30,
            ..EngineConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            EngineConfig {
                minimax_depth: 0,
                ..EngineConfig::default()
            },
            EngineConfig {
                mcts_iterations: 0,
                ..EngineConfig::default()
            },
            EngineConfig {
                exploration: -1.0,
                ..EngineConfig::default()
            },
            EngineConfig {
                rollout_cap: 0,
                ..EngineConfig::default()
            },
            EngineConfig {
                neighbor_radius: 0,
                ..EngineConfig::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = EngineConfig::from_toml("minimax_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/gomoku/engine.toml");
        assert!(matches!(
            EngineConfig::load(path),
            Err(ConfigError::FileRead { .. })
        ));
        assert_eq!(
            EngineConfig::load_or_default(path).unwrap(),
            EngineConfig::default()
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("rollout_cap must be > 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: rollout_cap must be > 0"
        );
    }
}
