//! Poise framework setup and the dispatch contract
//!
//! The framework hooks implement the dispatcher: `command_check` gates
//! cooldown-limited commands before the handler runs, `post_command`
//! records a cooldown only after the handler succeeded, and `on_error`
//! catches every handler failure at the dispatch boundary, replying with the
//! command's generic failure message. A failed invocation never records a
//! cooldown.

use crate::context::{CommandError, Context, Data};
use crate::cooldown::{format_wait_message, is_gated};
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Build the framework with all commands and dispatch hooks wired up.
///
/// The setup callback registers the command set globally; a registration
/// failure is logged and leaves commands unavailable without taking the
/// process down.
pub fn create_framework(data: Data) -> poise::Framework<Data, CommandError> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                crate::price::kprice(),
                crate::exchanges::kexchanges(),
                crate::balance::kbal(),
                crate::market::kcoingecko(),
                crate::chain::khash_details(),
            ],
            command_check: Some(|ctx| Box::pin(cooldown_gate(ctx))),
            post_command: |ctx| Box::pin(record_cooldown(ctx)),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, "connected to Discord gateway");
                match poise::builtins::register_globally(ctx, &framework.options().commands)
                    .await
                {
                    Ok(()) => info!(
                        count = framework.options().commands.len(),
                        "registered application commands"
                    ),
                    Err(e) => {
                        error!(error = %e, "failed to register application commands");
                    }
                }
                Ok(data)
            })
        })
        .build()
}

/// Pre-invocation gate: reply with the remaining time and abort when the
/// invoking user is still inside the command's cooldown window.
async fn cooldown_gate(ctx: Context<'_>) -> Result<bool, CommandError> {
    let command = ctx.command().name.clone();
    if !is_gated(&command) {
        return Ok(true);
    }

    let user_id = ctx.author().id.get();
    if let Some(remaining) = ctx.data().cooldowns.check(user_id, &command, Instant::now()) {
        ctx.say(format_wait_message(&command, remaining)).await?;
        return Ok(false);
    }

    Ok(true)
}

/// Post-invocation hook, run only after a successful handler.
async fn record_cooldown(ctx: Context<'_>) {
    let command = &ctx.command().name;
    if is_gated(command) {
        let user_id = ctx.author().id.get();
        ctx.data().cooldowns.record(user_id, command, Instant::now());
    }
}

/// Generic failure string shown to the user when a handler errors.
pub fn failure_message(command: &str) -> &'static str {
    match command {
        "kprice" => "There was an error fetching the Kaspa market data.",
        "kexchanges" => "There was an error fetching the Kaspa exchanges data.",
        "kbal" => "There was an error fetching the Kaspa address details.",
        "kcoingecko" => "There was an error fetching the Kaspa market data from CoinGecko.",
        "khash-details" => "There was an error while fetching Kaspa blockchain details.",
        _ => "There was an error while executing the command.",
    }
}

/// Dispatch-boundary error handler; no handler error propagates past here.
async fn on_error(error: poise::FrameworkError<'_, Data, CommandError>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!(error = %error, "failed to set up the bot");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command = ctx.command().name.clone();
            error!(command = %command, error = %error, "command failed");
            if let Err(e) = ctx.say(failure_message(&command)).await {
                warn!(error = %e, "failed to deliver the failure reply");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "error while handling a framework error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages_cover_all_commands() {
        for command in ["kprice", "kexchanges", "kbal", "kcoingecko", "khash-details"] {
            let message = failure_message(command);
            assert!(message.starts_with("There was an error"), "{command}");
        }
        assert_eq!(
            failure_message("unknown"),
            "There was an error while executing the command."
        );
    }

    #[test]
    fn test_gated_commands_have_specific_failure_text() {
        assert!(failure_message("kcoingecko").contains("CoinGecko"));
        assert!(failure_message("kexchanges").contains("exchanges"));
    }
}
