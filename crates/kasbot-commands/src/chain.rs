//! Blockchain details command
//!
//! The widest fan-out of all commands: five upstream sources joined
//! fail-fast. The interaction is acknowledged immediately and the embed is
//! delivered once every source has settled.

use crate::context::{CommandError, Context};
use crate::reply::ReplyPayload;
use kasbot_common::format::{format_hashrate, format_utc_date, format_utc_time, group_digits};
use kasbot_common::BotError;
use kasbot_providers::HalvingInfo;

/// Get various details about the Kaspa blockchain
#[poise::command(slash_command, rename = "khash-details")]
pub async fn khash_details(ctx: Context<'_>) -> Result<(), CommandError> {
    ctx.defer().await?;

    let kaspa = &ctx.data().kaspa;
    let (halving, reward, hashrate, blue_score, block_dag) = tokio::try_join!(
        kaspa.halving(),
        kaspa.block_reward(),
        kaspa.hashrate(),
        kaspa.blue_score(),
        kaspa.block_dag(),
    )?;

    let next_halving = format_halving_schedule(&halving).ok_or_else(|| {
        BotError::upstream("info/halving", "next halving timestamp out of range")
    })?;

    let payload = ReplyPayload::new("🔗 Kaspa Blockchain Details")
        .description("**Various details about the Kaspa blockchain:**")
        .field(
            "📊 **Current Hashrate**",
            format!("```{}```", format_hashrate(hashrate)),
            false,
        )
        .field("🎁 **Rewards**", "```\nReward Information\n```", false)
        .field("💰 **Current Reward**", format!("{reward} KAS"), true)
        .field("⏳ **Next Halving**", next_halving, true)
        .field(
            "🔗 **BlockDAG Details**",
            "```\nNetwork Information\n```",
            false,
        )
        .field("🌐 **Network Name**", block_dag.network_name.clone(), false)
        .field("🧱 **Block Count**", group_digits(&block_dag.block_count), true)
        .field(
            "📑 **Header Count**",
            group_digits(&block_dag.header_count),
            true,
        )
        .field("📘 **Blue Score**", group_digits(&blue_score.to_string()), true);

    ctx.send(payload.into_reply()).await?;
    Ok(())
}

/// Three-line halving display: amount, date line, time line.
fn format_halving_schedule(halving: &HalvingInfo) -> Option<String> {
    let date = format_utc_date(halving.next_halving_timestamp)?;
    let time = format_utc_time(halving.next_halving_timestamp)?;
    Some(format!(
        "{:.8} KAS\non {date}\n{time}",
        halving.next_halving_amount
    ))
}
