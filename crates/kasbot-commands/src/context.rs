//! Shared command context and framework type aliases

use crate::cooldown::CooldownTracker;
use kasbot_config::Config;
use kasbot_providers::{CoinGeckoClient, KaspaClient};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state accessible from every command.
pub struct Data {
    /// Application configuration
    pub config: Arc<Config>,
    /// Kaspa REST API client
    pub kaspa: KaspaClient,
    /// CoinGecko API client
    pub coingecko: CoinGeckoClient,
    /// Cooldown table for gated commands
    pub cooldowns: CooldownTracker,
}

/// Error type for commands
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// Poise context type alias
pub type Context<'a> = poise::Context<'a, Data, CommandError>;

impl Data {
    /// Build the shared state from configuration.
    ///
    /// Both provider clients share one reqwest client so the connection pool
    /// and timeout settings apply uniformly.
    pub fn new(config: Config) -> kasbot_common::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.discord.request_timeout_seconds))
            .build()?;

        let kaspa = KaspaClient::new(http.clone(), &config.providers.kaspa_base_url)?;
        let coingecko = CoinGeckoClient::new(http, &config.providers.coingecko_base_url)?;

        Ok(Self {
            config: Arc::new(config),
            kaspa,
            coingecko,
            cooldowns: CooldownTracker::new(),
        })
    }
}
