//! CoinGecko API client
//!
//! Market data and exchange tickers for the fixed `kaspa` asset. Ticker
//! selection (kaspa/tether pairs, top entries by the upstream trust-score
//! ordering) is factored out as a pure function so it can be tested without
//! network access.

use kasbot_common::{BotError, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Asset identifier on CoinGecko.
const COIN_ID: &str = "kaspa";
/// Quote asset the ticker listing is filtered to.
const QUOTE_COIN_ID: &str = "tether";
/// How many tickers the exchange listing keeps.
const TOP_TICKER_COUNT: usize = 9;

/// Client for the CoinGecko API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: Url,
}

/// Aggregated market data for the asset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CoinMarketData {
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub price_change_percentage_24h: f64,
    pub high_24h: f64,
    pub low_24h: f64,
}

/// One exchange ticker from the tickers listing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExchangeTicker {
    pub base: String,
    pub target: String,
    #[serde(default)]
    pub coin_id: String,
    #[serde(default)]
    pub target_coin_id: String,
    pub last: f64,
    pub volume: f64,
    pub trade_url: Option<String>,
    pub market: TickerMarket,
}

/// Exchange descriptor nested in a ticker.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TickerMarket {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TickersResponse {
    tickers: Vec<ExchangeTicker>,
}

impl CoinGeckoClient {
    /// Create a client over a shared reqwest client.
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BotError::config(format!("invalid CoinGecko API base URL: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Current market data for kaspa, or `None` when the listing is empty.
    pub async fn market_data(&self) -> Result<Option<CoinMarketData>> {
        let entries: Vec<CoinMarketData> = self
            .get_json(
                &["coins", "markets"],
                &[("ids", COIN_ID), ("vs_currency", "usd")],
            )
            .await?;

        let Some(data) = entries.into_iter().next() else {
            return Ok(None);
        };

        for (field, value) in [
            ("current_price", data.current_price),
            ("market_cap", data.market_cap),
            ("total_volume", data.total_volume),
            ("price_change_percentage_24h", data.price_change_percentage_24h),
            ("high_24h", data.high_24h),
            ("low_24h", data.low_24h),
        ] {
            if !value.is_finite() {
                return Err(BotError::upstream(
                    "coins/markets",
                    format!("field `{field}` is not a finite number"),
                ));
            }
        }

        Ok(Some(data))
    }

    /// Top kaspa/tether tickers ordered by trust score.
    pub async fn top_exchanges(&self) -> Result<Vec<ExchangeTicker>> {
        let response: TickersResponse = self
            .get_json(
                &["coins", COIN_ID, "tickers"],
                &[("order", "trust_score_desc")],
            )
            .await?;

        Ok(select_top_tickers(response.tickers))
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BotError::config("CoinGecko API base URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.endpoint(segments, query)?;
        let endpoint = segments.join("/");
        debug!(%url, "fetching from CoinGecko");

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
                body.chars().take(256).collect::<String>(),
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

/// Keep only kaspa/tether pairs, preserving the upstream trust-score order,
/// capped at [`TOP_TICKER_COUNT`] entries.
pub fn select_top_tickers(tickers: Vec<ExchangeTicker>) -> Vec<ExchangeTicker> {
    tickers
        .into_iter()
        .filter(|t| t.coin_id == COIN_ID && t.target_coin_id == QUOTE_COIN_ID)
        .take(TOP_TICKER_COUNT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker(name: &str, coin_id: &str, target_coin_id: &str) -> ExchangeTicker {
        ExchangeTicker {
            base: "KAS".to_string(),
            target: "USDT".to_string(),
            coin_id: coin_id.to_string(),
            target_coin_id: target_coin_id.to_string(),
            last: 0.15,
            volume: 1_000_000.0,
            trade_url: Some(format!("https://example.com/{name}")),
            market: TickerMarket {
                name: name.to_string(),
            },
        }
    }

    #[test]
    fn test_select_top_tickers_filters_pairs() {
        let tickers = vec![
            ticker("Alpha", "kaspa", "tether"),
            ticker("WrongQuote", "kaspa", "bitcoin"),
            ticker("WrongBase", "other", "tether"),
            ticker("Beta", "kaspa", "tether"),
        ];

        let selected = select_top_tickers(tickers);
        let names: Vec<&str> = selected.iter().map(|t| t.market.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_select_top_tickers_caps_at_nine() {
        let tickers: Vec<ExchangeTicker> = (0..20)
            .map(|i| ticker(&format!("Exchange {i}"), "kaspa", "tether"))
            .collect();

        let selected = select_top_tickers(tickers);
        assert_eq!(selected.len(), 9);
        // order preserved: the upstream listing is already trust-score sorted
        assert_eq!(selected[0].market.name, "Exchange 0");
        assert_eq!(selected[8].market.name, "Exchange 8");
    }

    #[test]
    fn test_select_top_tickers_drops_unlabeled_pairs() {
        // tickers missing coin ids deserialize to empty strings and never match
        let tickers = vec![ticker("NoIds", "", "")];
        assert!(select_top_tickers(tickers).is_empty());
    }

    #[test]
    fn test_market_data_model_deserialization() {
        let json = r#"[{
            "current_price": 0.1542,
            "market_cap": 3900000000,
            "total_volume": 85000000,
            "price_change_percentage_24h": -2.41,
            "high_24h": 0.1611,
            "low_24h": 0.1527,
            "ath": 0.2
        }]"#;

        let entries: Vec<CoinMarketData> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].current_price, 0.1542);
        assert_eq!(entries[0].market_cap, 3_900_000_000.0);
    }

    #[test]
    fn test_ticker_model_deserialization() {
        let json = r#"{
            "base": "KAS",
            "target": "USDT",
            "coin_id": "kaspa",
            "target_coin_id": "tether",
            "last": 0.1538,
            "volume": 12500000.5,
            "trade_url": "https://example.com/trade/KAS_USDT",
            "market": {"name": "Example Exchange"}
        }"#;

        let ticker: ExchangeTicker = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.market.name, "Example Exchange");
        assert_eq!(ticker.target_coin_id, "tether");
        assert!(ticker.trade_url.is_some());
    }

    #[test]
    fn test_endpoint_builds_query() {
        let client = CoinGeckoClient::new(Client::new(), "https://api.coingecko.com/api/v3")
            .unwrap();
        let url = client
            .endpoint(&["coins", "markets"], &[("ids", "kaspa"), ("vs_currency", "usd")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coingecko.com/api/v3/coins/markets?ids=kaspa&vs_currency=usd"
        );
    }
}
