//! Kaspa REST API client
//!
//! One method per endpoint, each validating required fields before handing a
//! normalized value back to the command layer. The address summary fans out
//! three concurrent sub-requests and fails as a whole if any of them fails.

use kasbot_common::{BotError, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Sompi per KAS.
const SOMPI_PER_KAS: f64 = 100_000_000.0;

/// How much of an upstream error body to keep in error context.
const BODY_CONTEXT_LIMIT: usize = 256;

/// Client for the Kaspa REST API.
#[derive(Debug, Clone)]
pub struct KaspaClient {
    client: Client,
    base_url: Url,
}

/// Balance, UTXO count, and transaction count of one address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressSummary {
    /// Balance in KAS (converted from sompi)
    pub balance_kas: f64,
    /// Number of unspent outputs
    pub utxo_count: usize,
    /// Total transactions seen for the address
    pub transaction_count: u64,
}

/// Block-DAG summary with counts kept as decimal strings.
///
/// The counts can exceed what fits losslessly in a double, so they are never
/// parsed numerically; display formatting groups the digits textually.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BlockDagInfo {
    #[serde(rename = "networkName")]
    pub network_name: String,
    #[serde(rename = "blockCount")]
    pub block_count: String,
    #[serde(rename = "headerCount")]
    pub header_count: String,
}

/// Next halving schedule.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HalvingInfo {
    #[serde(rename = "nextHalvingTimestamp")]
    pub next_halving_timestamp: i64,
    #[serde(rename = "nextHalvingAmount")]
    pub next_halving_amount: f64,
}

#[derive(Debug, Deserialize)]
struct PriceInfo {
    price: f64,
}

#[derive(Debug, Deserialize)]
struct MarketCapInfo {
    marketcap: f64,
}

#[derive(Debug, Deserialize)]
struct HashrateInfo {
    hashrate: f64,
}

#[derive(Debug, Deserialize)]
struct BlockRewardInfo {
    blockreward: f64,
}

#[derive(Debug, Deserialize)]
struct BlueScoreInfo {
    #[serde(rename = "blueScore")]
    blue_score: u64,
}

#[derive(Debug, Deserialize)]
struct BalanceInfo {
    balance: f64,
}

#[derive(Debug, Deserialize)]
struct TransactionsCountInfo {
    total: u64,
}

impl KaspaClient {
    /// Create a client over a shared reqwest client.
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BotError::config(format!("invalid Kaspa API base URL: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Current KAS price in USD.
    pub async fn price(&self) -> Result<f64> {
        let info: PriceInfo = self.get_json(&["info", "price"]).await?;
        ensure_finite("info/price", "price", info.price)
    }

    /// Current market capitalization in USD.
    pub async fn market_cap(&self) -> Result<f64> {
        let info: MarketCapInfo = self.get_json(&["info", "marketcap"]).await?;
        ensure_finite("info/marketcap", "marketcap", info.marketcap)
    }

    /// Network hashrate in TH/s.
    pub async fn hashrate(&self) -> Result<f64> {
        let info: HashrateInfo = self.get_json(&["info", "hashrate"]).await?;
        ensure_finite("info/hashrate", "hashrate", info.hashrate)
    }

    /// Current block reward in KAS.
    pub async fn block_reward(&self) -> Result<f64> {
        let info: BlockRewardInfo = self.get_json(&["info", "blockreward"]).await?;
        let reward = ensure_finite("info/blockreward", "blockreward", info.blockreward)?;
        if reward == 0.0 {
            return Err(BotError::upstream(
                "info/blockreward",
                "block reward missing or zero",
            ));
        }
        Ok(reward)
    }

    /// Blue score of the virtual chain.
    pub async fn blue_score(&self) -> Result<u64> {
        let info: BlueScoreInfo = self
            .get_json(&["info", "virtual-chain-blue-score"])
            .await?;
        if info.blue_score == 0 {
            return Err(BotError::upstream(
                "info/virtual-chain-blue-score",
                "blue score missing or zero",
            ));
        }
        Ok(info.blue_score)
    }

    /// Block-DAG summary (network name, block count, header count).
    pub async fn block_dag(&self) -> Result<BlockDagInfo> {
        let info: BlockDagInfo = self.get_json(&["info", "blockdag"]).await?;
        validate_block_dag(info)
    }

    /// Next halving amount and timestamp.
    pub async fn halving(&self) -> Result<HalvingInfo> {
        let info: HalvingInfo = self.get_json(&["info", "halving"]).await?;
        ensure_finite("info/halving", "nextHalvingAmount", info.next_halving_amount)?;
        Ok(info)
    }

    /// Balance, UTXO set size, and transaction count for one address.
    ///
    /// The three sub-requests are issued together and joined fail-fast: the
    /// first error wins and no partial summary is ever produced.
    pub async fn address_summary(&self, address: &str) -> Result<AddressSummary> {
        let balance_segments = ["addresses", address, "balance"];
        let utxos_segments = ["addresses", address, "utxos"];
        let tx_count_segments = ["addresses", address, "transactions-count"];
        let (balance, utxos, tx_count) = tokio::try_join!(
            self.get_json::<BalanceInfo>(&balance_segments),
            self.get_json::<Vec<serde_json::Value>>(&utxos_segments),
            self.get_json::<TransactionsCountInfo>(&tx_count_segments),
        )?;

        let balance_kas = kas_from_sompi(balance.balance);
        ensure_finite(
            &format!("addresses/{address}/balance"),
            "balance",
            balance_kas,
        )?;

        Ok(AddressSummary {
            balance_kas,
            utxo_count: utxos.len(),
            transaction_count: tx_count.total,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BotError::config("Kaspa API base URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let endpoint = segments.join("/");
        debug!(%url, "fetching from Kaspa API");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BotError::upstream(&endpoint, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::upstream_with_status(
                &endpoint,
                status.as_u16(),
                truncate_body(&body),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotError::upstream(&endpoint, format!("failed to read body: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| BotError::upstream(&endpoint, format!("malformed JSON response: {e}")))
    }
}

/// Convert a sompi-denominated amount to KAS.
pub fn kas_from_sompi(sompi: f64) -> f64 {
    sompi / SOMPI_PER_KAS
}

fn ensure_finite(endpoint: &str, field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BotError::upstream(
            endpoint,
            format!("field `{field}` is not a finite number"),
        ))
    }
}

fn validate_block_dag(info: BlockDagInfo) -> Result<BlockDagInfo> {
    if info.network_name.is_empty() || info.block_count.is_empty() || info.header_count.is_empty()
    {
        return Err(BotError::upstream(
            "info/blockdag",
            "missing network name or block/header counts",
        ));
    }
    Ok(info)
}

fn truncate_body(body: &str) -> String {
    if body.len() <= BODY_CONTEXT_LIMIT {
        body.to_string()
    } else {
        let prefix: String = body.chars().take(BODY_CONTEXT_LIMIT).collect();
        format!("{prefix}…")
    }
}
