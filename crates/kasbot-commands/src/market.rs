//! CoinGecko market data command

use crate::context::{CommandError, Context};
use crate::reply::ReplyPayload;
use kasbot_common::format::format_number;

/// Get Kaspa market data from CoinGecko
#[poise::command(slash_command)]
pub async fn kcoingecko(ctx: Context<'_>) -> Result<(), CommandError> {
    let Some(data) = ctx.data().coingecko.market_data().await? else {
        ctx.say("No data found for Kaspa on CoinGecko.").await?;
        return Ok(());
    };

    let payload = ReplyPayload::new("📈 Kaspa Market Data")
        .description("**Kaspa CoinGecko Data**")
        .field(
            "📊 **Current Price**",
            format!("${:.4}", data.current_price),
            true,
        )
        .field(
            "💰 **Market Cap**",
            format!("${}", format_number(data.market_cap)),
            true,
        )
        .field(
            "📈 **24h Volume**",
            format!("${}", format_number(data.total_volume)),
            true,
        )
        .field(
            "🔄 **Change (24h)**",
            format!("{:.2}%", data.price_change_percentage_24h),
            true,
        )
        .field("🚀 **ATH-24H**", format!("${:.4}", data.high_24h), true)
        .field("📉 **ATL-24H**", format!("${:.4}", data.low_24h), true);

    ctx.send(payload.into_reply()).await?;
    Ok(())
}
