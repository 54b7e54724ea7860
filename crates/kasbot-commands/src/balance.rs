//! Address balance command

use crate::context::{CommandError, Context};
use crate::reply::ReplyPayload;

/// Get the balance, UTXOs, and transaction count of a Kaspa address
#[poise::command(slash_command)]
pub async fn kbal(
    ctx: Context<'_>,
    #[description = "The Kaspa address to check"] kaspaddress: String,
) -> Result<(), CommandError> {
    // address format checks are left to the API; a rejected address surfaces
    // as the command's generic failure
    let summary = ctx.data().kaspa.address_summary(&kaspaddress).await?;

    let payload = ReplyPayload::new("🔍 Kaspa Address Details").description(format!(
        "**📍 Address:** {kaspaddress}\n\
         **💰 Balance:** {} KAS\n\
         **🔗 UTXOs:** {}\n\
         **📈 Transaction Count:** {}",
        summary.balance_kas, summary.utxo_count, summary.transaction_count
    ));

    ctx.send(payload.into_reply()).await?;
    Ok(())
}
