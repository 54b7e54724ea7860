//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Discord-related configuration
    pub discord: DiscordConfig,

    /// Upstream data-provider configuration
    pub providers: ProviderConfig,

    /// Auxiliary health listener configuration
    pub health: HealthConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Discord bot configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token
    #[validate(length(min = 1, message = "Discord token cannot be empty"))]
    pub token: String,

    /// Request timeout in seconds for outbound HTTP calls
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub request_timeout_seconds: u64,
}

/// Upstream data-provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the Kaspa REST API
    #[validate(url(message = "Kaspa API base must be a valid URL"))]
    pub kaspa_base_url: String,

    /// Base URL of the CoinGecko API
    #[validate(url(message = "CoinGecko API base must be a valid URL"))]
    pub coingecko_base_url: String,
}

/// Auxiliary HTTP health listener
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HealthConfig {
    /// Whether the listener is started at all
    pub enabled: bool,

    /// TCP port to bind
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter used when RUST_LOG is absent
    #[validate(custom(
        function = "validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,
}

/// Validate a log level name
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            providers: ProviderConfig::default(),
            health: HealthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kaspa_base_url: "https://api.kaspa.org".to_string(),
            coingecko_base_url: "https://api.coingecko.com/api/v3".to_string(),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Validate every configuration section.
    ///
    /// The derive only checks the top level, so the sections are validated
    /// explicitly here.
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;
        self.discord.validate()?;
        self.providers.validate()?;
        self.health.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
