//! kasbot — Discord bot for Kaspa network market and blockchain data.

mod health;

use anyhow::Result;
use clap::Parser;
use kasbot_commands::{create_framework, Data};
use kasbot_config::ConfigLoader;
use poise::serenity_prelude::{self as serenity, GatewayIntents};
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter used when RUST_LOG is absent
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let filter = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    kasbot_common::logging::init_logging(&filter)?;

    info!("starting kasbot");

    if config.discord.token.is_empty() {
        anyhow::bail!("Discord token is required but not provided in configuration");
    }

    // Auxiliary health listener; it has no functional role in the bot
    if config.health.enabled {
        let port = config.health.port;
        tokio::spawn(async move {
            if let Err(e) = health::serve(port).await {
                error!(error = %e, "health listener failed");
            }
        });
    }

    let token = config.discord.token.clone();
    let data = Data::new(config)?;
    let framework = create_framework(data);

    let mut client =
        serenity::ClientBuilder::new(&token, GatewayIntents::non_privileged())
            .framework(framework)
            .await?;

    // Graceful shutdown on ctrl-c
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        info!("received shutdown signal, shutting down");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!(error = %why, "client error");
        return Err(why.into());
    }

    info!("kasbot has shut down");
    Ok(())
}
