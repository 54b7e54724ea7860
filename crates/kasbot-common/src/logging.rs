//! Tracing bootstrap for the bot process.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{BotError, Result};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `fallback_filter` applies when the
/// environment provides nothing (e.g. `"kasbot=info"`).
pub fn init_logging(fallback_filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| BotError::config(format!("failed to install tracing subscriber: {e}")))
}
