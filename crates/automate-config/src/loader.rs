//! Configuration loading and validation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::AutomateConfig;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Load full configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<AutomateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AutomateConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &AutomateConfig) -> Result<(), ConfigError> {
    if config.version == 0 {
        return Err(ConfigError::Invalid(
            "version must be greater than 0".to_string(),
        ));
    }

    if config.app.name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "app.name must not be empty".to_string(),
        ));
    }

    if config.backend.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "backend.base_url must not be empty".to_string(),
        ));
    }

    if config.backend.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "backend.timeout_secs must be > 0".to_string(),
        ));
    }

    if config.generator.model.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "generator.model must not be empty".to_string(),
        ));
    }

    if config.generator.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "generator.timeout_secs must be > 0".to_string(),
        ));
    }

    if config.generator.max_output_tokens == 0 {
        return Err(ConfigError::Invalid(
            "generator.max_output_tokens must be > 0".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.generator.temperature) {
        return Err(ConfigError::Invalid(
            "generator.temperature must be within 0.0..=2.0".to_string(),
        ));
    }

    Ok(())
}

/// Manages the process-wide configuration.
pub struct ConfigManager {
    path: PathBuf,
    config: Arc<RwLock<AutomateConfig>>,
}

impl ConfigManager {
    /// Create a new config manager.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(AutomateConfig::default())),
        }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> Arc<RwLock<AutomateConfig>> {
        self.config.clone()
    }

    /// Load configuration from file.
    pub async fn load(&self) -> Result<(), ConfigError> {
        let config = load_config(&self.path)?;
        let mut current = self.config.write().await;
        *current = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(validate_config(&AutomateConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = AutomateConfig::default();
        config.backend.base_url = "  ".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AutomateConfig::default();
        config.generator.timeout_secs = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let mut config = AutomateConfig::default();
        config.generator.temperature = 3.5;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: AutomateConfig = serde_yaml::from_str(
            r#"
backend:
  base_url: https://store.example/api
generator:
  model: gemini-2.0-flash
"#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://store.example/api");
        assert_eq!(config.generator.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.generator.top_k, 40);
        assert_eq!(config.version, 1);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_manager_keeps_defaults_until_loaded() {
        tokio_test::block_on(async {
            let manager = ConfigManager::new("does-not-exist.yaml");
            let config = manager.config();
            assert_eq!(config.read().await.app.name, "automate");
            assert!(manager.load().await.is_err());
        });
    }
}
