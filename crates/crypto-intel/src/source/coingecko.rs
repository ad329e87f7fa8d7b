//! CoinGecko Market Data Client
//!
//! REST client for the public market data API. The free tier needs no key;
//! a demo key raises the rate allowance.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::MarketSource;
use crate::config::MarketConfig;
use crate::error::{IntelError, Result};
use crate::model::{MarketTicker, TokenQuote, TrendingEntry};

/// CoinGecko REST client
pub struct CoinGeckoClient {
    client: reqwest::Client,
    config: MarketConfig,
}

impl CoinGeckoClient {
    pub fn new(config: MarketConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent("crypto-intel/0.1")
            .build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(MarketConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn key_param(&self) -> Vec<(&'static str, String)> {
        self.config
            .api_key
            .iter()
            .map(|k| ("x_cg_demo_api_key", k.clone()))
            .collect()
    }
}

/// Convert an upstream float to a Decimal, zero on non-finite input
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO)
}

/// Parse a formatted money string like "$59,211,148" (the trending
/// endpoint reports volume and market cap this way)
fn parse_money(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct CoinResponse {
    symbol: String,
    name: String,
    market_data: CoinMarketData,
}

#[derive(Debug, Deserialize)]
struct CoinMarketData {
    #[serde(default)]
    current_price: HashMap<String, f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    high_24h: HashMap<String, f64>,
    #[serde(default)]
    low_24h: HashMap<String, f64>,
    #[serde(default)]
    market_cap: HashMap<String, f64>,
    #[serde(default)]
    total_volume: HashMap<String, f64>,
}

impl CoinMarketData {
    fn usd(map: &HashMap<String, f64>) -> Decimal {
        to_decimal(map.get("usd").copied().unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct MarketRow {
    symbol: String,
    name: String,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    total_volume: Option<f64>,
    #[serde(default)]
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    coins: Vec<TrendingCoin>,
}

#[derive(Debug, Deserialize)]
struct TrendingCoin {
    item: TrendingItem,
}

#[derive(Debug, Deserialize)]
struct TrendingItem {
    symbol: String,
    name: String,
    #[serde(default)]
    data: Option<TrendingData>,
}

#[derive(Debug, Deserialize)]
struct TrendingData {
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<HashMap<String, f64>>,
    #[serde(default)]
    total_volume: Option<String>,
    #[serde(default)]
    market_cap: Option<String>,
}

#[async_trait]
impl MarketSource for CoinGeckoClient {
    async fn coin(&self, id: &str) -> Result<TokenQuote> {
        let mut params = vec![
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("market_data", "true".to_string()),
            ("community_data", "false".to_string()),
            ("developer_data", "false".to_string()),
            ("sparkline", "false".to_string()),
        ];
        params.extend(self.key_param());

        let response = self
            .client
            .get(self.url(&format!("/coins/{id}")))
            .query(&params)
            .send()
            .await?;

        match response.status().as_u16() {
            404 => return Err(IntelError::NotFound(id.to_string())),
            status if status >= 400 => {
                return Err(IntelError::Status {
                    status,
                    endpoint: "coins".into(),
                });
            }
            _ => {}
        }

        let coin: CoinResponse = response.json().await?;
        let market = &coin.market_data;

        Ok(TokenQuote {
            symbol: coin.symbol.to_uppercase(),
            name: coin.name,
            price: CoinMarketData::usd(&market.current_price),
            change_24h: to_decimal(market.price_change_percentage_24h.unwrap_or_default()),
            high_24h: CoinMarketData::usd(&market.high_24h),
            low_24h: CoinMarketData::usd(&market.low_24h),
            market_cap: CoinMarketData::usd(&market.market_cap),
            volume_24h: CoinMarketData::usd(&market.total_volume),
            as_of: Utc::now(),
        })
    }

    async fn markets(&self, per_page: usize) -> Result<Vec<MarketTicker>> {
        let mut params = vec![
            ("vs_currency", "usd".to_string()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", per_page.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
            ("price_change_percentage", "24h".to_string()),
        ];
        params.extend(self.key_param());

        let response = self
            .client
            .get(self.url("/coins/markets"))
            .query(&params)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(IntelError::Status {
                status,
                endpoint: "markets".into(),
            });
        }

        let rows: Vec<MarketRow> = response.json().await?;

        Ok(rows
            .into_iter()
            .map(|row| MarketTicker {
                symbol: row.symbol.to_uppercase(),
                name: row.name,
                price: to_decimal(row.current_price.unwrap_or_default()),
                change_24h: to_decimal(row.price_change_percentage_24h.unwrap_or_default()),
                volume_24h: to_decimal(row.total_volume.unwrap_or_default()),
                market_cap: to_decimal(row.market_cap.unwrap_or_default()),
            })
            .collect())
    }

    async fn trending(&self) -> Result<Vec<TrendingEntry>> {
        let params = self.key_param();

        let response = self
            .client
            .get(self.url("/search/trending"))
            .query(&params)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(IntelError::Status {
                status,
                endpoint: "trending".into(),
            });
        }

        let trending: TrendingResponse = response.json().await?;

        Ok(trending
            .coins
            .into_iter()
            .enumerate()
            .map(|(i, coin)| {
                let data = coin.item.data.unwrap_or(TrendingData {
                    price: None,
                    price_change_percentage_24h: None,
                    total_volume: None,
                    market_cap: None,
                });
                TrendingEntry {
                    symbol: coin.item.symbol.to_uppercase(),
                    name: coin.item.name,
                    rank: i + 1,
                    price: to_decimal(data.price.unwrap_or_default()),
                    change_24h: to_decimal(
                        data.price_change_percentage_24h
                            .as_ref()
                            .and_then(|m| m.get("usd").copied())
                            .unwrap_or_default(),
                    ),
                    volume_24h: data.total_volume.as_deref().and_then(parse_money),
                    market_cap: data.market_cap.as_deref().and_then(parse_money),
                }
            })
            .collect())
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}
