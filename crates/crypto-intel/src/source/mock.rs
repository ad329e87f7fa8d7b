//! Mock Market Source
//!
//! For testing and demos. Serves a static quote table, counts every call,
//! and can be scripted to fail the first N calls with a transient error.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::MarketSource;
use crate::error::{IntelError, Result};
use crate::model::{MarketTicker, TokenQuote, TrendingEntry};

/// Mock market source with static data
pub struct MockMarketSource {
    calls: AtomicUsize,
    fail_first: AtomicU32,
}

impl Default for MockMarketSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketSource {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_first: AtomicU32::new(0),
        }
    }

    /// Fail the first `times` calls with a retryable 503 before serving data
    pub fn failing(times: u32) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_first: AtomicU32::new(times),
        }
    }

    /// Total calls observed across all operations
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_first.store(remaining - 1, Ordering::SeqCst);
            return Err(IntelError::Status {
                status: 503,
                endpoint: "mock".into(),
            });
        }
        Ok(())
    }

    // (price, symbol, name, 24h change)
    fn table(id: &str) -> Option<(Decimal, &'static str, &'static str, Decimal)> {
        match id {
            "bitcoin" => Some((dec!(97500), "BTC", "Bitcoin", dec!(2.5))),
            "ethereum" => Some((dec!(3450), "ETH", "Ethereum", dec!(1.8))),
            "solana" => Some((dec!(195), "SOL", "Solana", dec!(4.2))),
            "cardano" => Some((dec!(0.95), "ADA", "Cardano", dec!(-1.2))),
            "polkadot" => Some((dec!(7.20), "DOT", "Polkadot", dec!(0.8))),
            "ripple" => Some((dec!(2.35), "XRP", "Ripple", dec!(0.9))),
            "dogecoin" => Some((dec!(0.38), "DOGE", "Dogecoin", dec!(12.0))),
            _ => None,
        }
    }
}

#[async_trait]
impl MarketSource for MockMarketSource {
    async fn coin(&self, id: &str) -> Result<TokenQuote> {
        self.record_call()?;

        let (price, symbol, name, change) =
            Self::table(id).ok_or_else(|| IntelError::NotFound(id.to_string()))?;

        Ok(TokenQuote {
            symbol: symbol.into(),
            name: name.into(),
            price,
            change_24h: change,
            high_24h: price * dec!(1.02),
            low_24h: price * dec!(0.98),
            market_cap: price * dec!(19_000_000),
            volume_24h: price * dec!(300_000),
            as_of: Utc::now(),
        })
    }

    async fn markets(&self, per_page: usize) -> Result<Vec<MarketTicker>> {
        self.record_call()?;

        let rows = vec![
            ("BTC", "Bitcoin", dec!(97500), dec!(2.5)),
            ("ETH", "Ethereum", dec!(3450), dec!(1.8)),
            ("SOL", "Solana", dec!(195), dec!(4.2)),
            ("DOGE", "Dogecoin", dec!(0.38), dec!(12.0)),
            ("ADA", "Cardano", dec!(0.95), dec!(-1.2)),
            ("DOT", "Polkadot", dec!(7.20), dec!(0.8)),
            ("XRP", "Ripple", dec!(2.35), dec!(-6.1)),
            ("AVAX", "Avalanche", dec!(42), dec!(-3.4)),
        ];

        Ok(rows
            .into_iter()
            .take(per_page)
            .map(|(symbol, name, price, change)| MarketTicker {
                symbol: symbol.into(),
                name: name.into(),
                price,
                change_24h: change,
                volume_24h: price * dec!(100_000),
                market_cap: price * dec!(19_000_000),
            })
            .collect())
    }

    async fn trending(&self) -> Result<Vec<TrendingEntry>> {
        self.record_call()?;

        Ok(vec![
            TrendingEntry {
                symbol: "SOL".into(),
                name: "Solana".into(),
                rank: 1,
                price: dec!(195),
                change_24h: dec!(4.2),
                volume_24h: Some(dec!(3_000_000_000)),
                market_cap: Some(dec!(91_000_000_000)),
            },
            TrendingEntry {
                symbol: "DOGE".into(),
                name: "Dogecoin".into(),
                rank: 2,
                price: dec!(0.38),
                change_24h: dec!(12.0),
                volume_24h: Some(dec!(2_100_000_000)),
                market_cap: Some(dec!(55_000_000_000)),
            },
        ])
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_token() {
        let source = MockMarketSource::new();
        let btc = source.coin("bitcoin").await.unwrap();
        assert_eq!(btc.symbol, "BTC");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let source = MockMarketSource::new();
        let result = source.coin("frobnicoin").await;
        assert!(matches!(result, Err(IntelError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_scripted_failures_then_success() {
        let source = MockMarketSource::failing(2);
        assert!(source.coin("bitcoin").await.is_err());
        assert!(source.coin("bitcoin").await.is_err());
        assert!(source.coin("bitcoin").await.is_ok());
        assert_eq!(source.calls(), 3);
    }
}
