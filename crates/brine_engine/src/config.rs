//! Engine configuration, loadable from a TOML file

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for an [`Engine`](crate::Engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed simulation tick length in milliseconds (at least 1)
    pub fixed_tick_millis: u64,
    /// Render frame-rate cap; `None` renders as fast as the host allows
    pub target_fps: Option<u32>,
    /// Log filter applied when the host initializes logging from config
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_tick_millis: 1,
            target_fps: None,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Override the fixed tick length
    #[must_use]
    pub fn with_fixed_tick_millis(mut self, millis: u64) -> Self {
        self.fixed_tick_millis = millis;
        self
    }

    /// Override the frame-rate cap
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    /// Override the log filter
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Check the configuration for out-of-range values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fixed_tick_millis == 0 {
            return Err(ConfigError::Invalid(
                "fixed_tick_millis must be at least 1".to_string(),
            ));
        }
        if self.target_fps == Some(0) {
            return Err(ConfigError::Invalid(
                "target_fps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_tick_is_invalid() {
        let config = EngineConfig::default().with_fixed_tick_millis(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_fps_is_invalid() {
        let config = EngineConfig::default().with_target_fps(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("brine_config_{}.toml", std::process::id()));
        std::fs::write(&path, "fixed_tick_millis = 5\ntarget_fps = 60\n").unwrap();

        let config = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(config.fixed_tick_millis, 5);
        assert_eq!(config.target_fps, Some(60));
        assert_eq!(config.log_level, "info");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let path =
            std::env::temp_dir().join(format!("brine_config_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "fixed_tick_millis = \"soon\"\n").unwrap();

        assert!(matches!(
            EngineConfig::load_from_file(&path),
            Err(ConfigError::Parse(_))
        ));

        std::fs::remove_file(&path).unwrap();
    }
}
