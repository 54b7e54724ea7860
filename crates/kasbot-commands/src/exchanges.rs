//! Exchange listing command

use crate::context::{CommandError, Context};
use crate::reply::ReplyPayload;
use kasbot_common::format::format_number;

/// Get the top Kaspa exchanges with highest trading volume
#[poise::command(slash_command)]
pub async fn kexchanges(ctx: Context<'_>) -> Result<(), CommandError> {
    let tickers = ctx.data().coingecko.top_exchanges().await?;

    let mut payload =
        ReplyPayload::new("📊 Top Kaspa Exchanges").description("**Kaspa Exchange Data**");

    for (index, ticker) in tickers.iter().enumerate() {
        let mut value = format!(
            "🔄 **Pair:** {}/{}\n💵 **Price:** ${}\n📊 **Volume:** ${}",
            ticker.base,
            ticker.target,
            ticker.last,
            format_number(ticker.volume)
        );
        if let Some(url) = &ticker.trade_url {
            value.push_str(&format!("\n[🔍 VIEW]({url})"));
        }

        payload = payload.field(
            format!("**{}. {}**", index + 1, ticker.market.name),
            value,
            true,
        );
    }

    ctx.send(payload.into_reply()).await?;
    Ok(())
}
