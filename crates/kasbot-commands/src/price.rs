//! Price command

use crate::context::{CommandError, Context};
use crate::reply::ReplyPayload;
use kasbot_common::format::format_number;

/// Get the current Kaspa market data
#[poise::command(slash_command)]
pub async fn kprice(ctx: Context<'_>) -> Result<(), CommandError> {
    let kaspa = &ctx.data().kaspa;
    let (price, market_cap) = tokio::try_join!(kaspa.price(), kaspa.market_cap())?;

    let payload = ReplyPayload::new("Kaspa Price & Market Data")
        .field(
            "💵 Current Kaspa Price",
            format!("${price:.6} KAS"),
            false,
        )
        .field(
            "📊 Market Cap",
            format!("${}", format_number(market_cap)),
            false,
        );

    ctx.send(payload.into_reply()).await?;
    Ok(())
}
