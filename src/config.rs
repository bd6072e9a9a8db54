//! Configuration management for symptomcheck
//!
//! TOML configuration with built-in defaults and validation.
//! Location: ~/.symptomcheck/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::advice::AdviceConfig;
use crate::errors::{Result, TriageError};
use crate::ranking::RankConfig;
use crate::training::TrainingConfig;

/// Complete configuration for symptomcheck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub ranking: RankConfig,
    #[serde(default)]
    pub advice: AdviceConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model artifact location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub artifact_dir: String,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact_dir: "~/.symptomcheck/model".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TriageError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| TriageError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".symptomcheck").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, v: f64| -> Result<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(TriageError::ConfigError(format!(
                    "{} must be between 0.0 and 1.0",
                    name
                )))
            }
        };

        unit("ranking.threshold", self.ranking.threshold)?;
        unit("ranking.fallback_floor", self.ranking.fallback_floor)?;
        unit("advice.escalation_threshold", self.advice.escalation_threshold)?;

        if self.ranking.fallback_floor > self.ranking.threshold {
            return Err(TriageError::ConfigError(
                "fallback_floor must not exceed threshold".to_string(),
            ));
        }

        if self.ranking.max_results == 0 {
            return Err(TriageError::ConfigError(
                "max_results must be greater than 0".to_string(),
            ));
        }

        if self.training.max_features == 0 {
            return Err(TriageError::ConfigError(
                "max_features must be greater than 0".to_string(),
            ));
        }

        if self.training.regularization <= 0.0 || !self.training.regularization.is_finite() {
            return Err(TriageError::ConfigError(
                "regularization must be a positive number".to_string(),
            ));
        }

        if self.model.artifact_dir.trim().is_empty() {
            return Err(TriageError::ConfigError(
                "artifact_dir must not be empty".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(TriageError::ConfigError(format!(
                    "Invalid log level: {}",
                    self.logging.level
                )))
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TriageError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TriageError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TriageError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get model artifact directory
    pub fn artifact_dir(&self) -> PathBuf {
        Self::expand_path(&self.model.artifact_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ranking.threshold, 0.02);
        assert_eq!(config.ranking.fallback_floor, 0.01);
        assert_eq!(config.ranking.max_results, 5);
        assert_eq!(config.advice.escalation_threshold, 0.3);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_threshold_range() {
        let mut config = Config::default();
        config.ranking.threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_floor_above_threshold() {
        let mut config = Config::default();
        config.ranking.fallback_floor = 0.05;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_results() {
        let mut config = Config::default();
        config.ranking.max_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [ranking]
            threshold = 0.05
            fallback_floor = 0.01
            max_results = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.ranking.max_results, 3);
        assert_eq!(config.advice.escalation_threshold, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.model.artifact_dir = "/opt/models/triage".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded.model.artifact_dir, "/opt/models/triage");
        assert_eq!(loaded.artifact_dir(), PathBuf::from("/opt/models/triage"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path("~/.symptomcheck");
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let expanded = Config::expand_path("/absolute/path");
        assert_eq!(expanded.to_string_lossy(), "/absolute/path");
    }
}
