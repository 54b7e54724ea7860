//! Configuration loading utilities

use crate::Config;
use kasbot_common::{BotError, Result as BotResult};
use std::env;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the configuration file
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for BotError {
    fn from(err: ConfigError) -> Self {
        BotError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// Precedence: `KASBOT_CONFIG_PATH`, then `config.yaml`/`config.yml` in
    /// the working directory, then built-in defaults. Environment overrides
    /// apply in every case.
    pub fn load() -> BotResult<Config> {
        let config = if let Ok(config_path) = env::var("KASBOT_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::Validation)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BotResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(token) = env::var("DISCORD_BOT_TOKEN") {
            config.discord.token = token;
        }

        if let Ok(timeout) = env::var("KASBOT_REQUEST_TIMEOUT") {
            config.discord.request_timeout_seconds =
                timeout.parse().map_err(|e| ConfigError::EnvParse {
                    var: "KASBOT_REQUEST_TIMEOUT".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(base) = env::var("KASPA_API_BASE") {
            config.providers.kaspa_base_url = base;
        }

        if let Ok(base) = env::var("COINGECKO_API_BASE") {
            config.providers.coingecko_base_url = base;
        }

        if let Ok(port) = env::var("PORT") {
            config.health.port = port.parse().map_err(|e| ConfigError::EnvParse {
                var: "PORT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(level) = env::var("KASBOT_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "discord:\n  token: \"abc.def.ghi\"\n  request_timeout_seconds: 10\nhealth:\n  port: 8080\n"
        )
        .expect("write yaml");

        let config = ConfigLoader::load_config(file.path()).expect("load");
        assert_eq!(config.discord.token, "abc.def.ghi");
        assert_eq!(config.discord.request_timeout_seconds, 10);
        assert_eq!(config.health.port, 8080);
        // untouched sections keep their defaults
        assert_eq!(config.providers.kaspa_base_url, "https://api.kaspa.org");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "discord:\n  token: \"abc.def.ghi\"\n  request_timeout_seconds: 0\n"
        )
        .expect("write yaml");

        let result = ConfigLoader::load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_config_rejects_malformed_yaml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "discord: [not, a, mapping").expect("write yaml");

        let result = ConfigLoader::load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ConfigLoader::load_config("/nonexistent/kasbot-config.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
