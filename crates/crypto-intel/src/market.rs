//! Market Data Service
//!
//! Cached, rate-limited, retried access to the market source. Every call
//! runs the same fixed middleware order: rate-limit outermost, then retry,
//! then cache, then the raw fetch — the decorator stack of the reference
//! implementation made explicit. One consequence is kept deliberately: a
//! cache hit still consumes one unit of rate budget.
//!
//! All operations resolve to [`Fetched`]; no error escapes to synthesis.

use std::sync::Arc;

use crate::cache::TtlCache;
use crate::config::{CacheTtl, IntelConfig, RateBudget};
use crate::error::{Fetched, IntelError};
use crate::extract;
use crate::limiter::{RateLimiter, RetryPolicy};
use crate::model::{MarketTicker, MoverEntry, MoverKind, TokenQuote, TrendingEntry};
use crate::source::MarketSource;

/// Logical endpoint id for the rate window
const ENDPOINT: &str = "market";

/// Size of the universe the movers are derived from
const MOVERS_UNIVERSE: usize = 100;

/// Market data fetch service
pub struct MarketService {
    source: Arc<dyn MarketSource>,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
    budget: RateBudget,
    ttl: CacheTtl,
    quotes: TtlCache<TokenQuote>,
    trending: TtlCache<Vec<TrendingEntry>>,
    universe: TtlCache<Vec<MarketTicker>>,
}

impl MarketService {
    pub fn new(
        source: Arc<dyn MarketSource>,
        limiter: Arc<RateLimiter>,
        config: &IntelConfig,
    ) -> Self {
        Self {
            source,
            limiter,
            retry: config.retry.clone(),
            budget: config.market_budget,
            ttl: config.ttl.clone(),
            quotes: TtlCache::new(),
            trending: TtlCache::new(),
            universe: TtlCache::new(),
        }
    }

    /// Quote a token by alias or canonical id. Unknown aliases pass through
    /// to the upstream, which is the authority on their existence.
    pub async fn quote(&self, token: &str) -> Fetched<TokenQuote> {
        let id = extract::canonical_id(token);
        let key = format!("price:{id}");

        self.limiter
            .acquire(ENDPOINT, self.budget.max_calls, self.budget.period)
            .await;

        let result = self
            .retry
            .run("quote", || {
                let id = id.clone();
                let key = key.clone();
                async move {
                    if let Some(hit) = self.quotes.get(&key) {
                        return Ok(hit);
                    }
                    let quote = self.source.coin(&id).await?;
                    self.quotes.insert(key, quote.clone(), self.ttl.price);
                    Ok(quote)
                }
            })
            .await;

        match result {
            Ok(quote) => Fetched::Ok(quote),
            Err(IntelError::NotFound(_)) => {
                tracing::info!(token = %id, "token not found upstream");
                Fetched::NotFound
            }
            Err(err) => {
                tracing::error!(token = %id, error = %err, "quote unavailable");
                Fetched::Unavailable
            }
        }
    }

    /// Two concurrent quotes; total latency is bounded by the slower fetch
    pub async fn quote_pair(
        &self,
        first: &str,
        second: &str,
    ) -> (Fetched<TokenQuote>, Fetched<TokenQuote>) {
        tokio::join!(self.quote(first), self.quote(second))
    }

    /// Currently trending tokens
    pub async fn trending(&self, limit: usize) -> Fetched<Vec<TrendingEntry>> {
        self.limiter
            .acquire(ENDPOINT, self.budget.max_calls, self.budget.period)
            .await;

        let result = self
            .retry
            .run("trending", || async move {
                if let Some(hit) = self.trending.get("trending:all") {
                    return Ok(hit);
                }
                let entries = self.source.trending().await?;
                self.trending
                    .insert("trending:all", entries.clone(), self.ttl.trending);
                Ok(entries)
            })
            .await;

        match result {
            Ok(mut entries) => {
                entries.truncate(limit);
                Fetched::Ok(entries)
            }
            Err(err) => {
                tracing::error!(error = %err, "trending unavailable");
                Fetched::Unavailable
            }
        }
    }

    /// Top gainers or losers over 24h, derived from the top-100 market-cap
    /// universe. Losers come back worst first.
    pub async fn movers(&self, kind: MoverKind, limit: usize) -> Fetched<Vec<MoverEntry>> {
        self.limiter
            .acquire(ENDPOINT, self.budget.max_calls, self.budget.period)
            .await;

        let result = self
            .retry
            .run("movers", || async move {
                if let Some(hit) = self.universe.get("movers:universe") {
                    return Ok(hit);
                }
                let rows = self.source.markets(MOVERS_UNIVERSE).await?;
                self.universe
                    .insert("movers:universe", rows.clone(), self.ttl.movers);
                Ok(rows)
            })
            .await;

        let mut rows = match result {
            Ok(rows) => rows,
            Err(err) => {
                tracing::error!(error = %err, kind = %kind, "movers unavailable");
                return Fetched::Unavailable;
            }
        };

        rows.sort_by(|a, b| b.change_24h.cmp(&a.change_24h));

        let selected: Vec<MoverEntry> = match kind {
            MoverKind::Gainers => rows
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, row)| to_mover(i + 1, row))
                .collect(),
            MoverKind::Losers => rows
                .iter()
                .rev()
                .take(limit)
                .enumerate()
                .map(|(i, row)| to_mover(i + 1, row))
                .collect(),
        };

        Fetched::Ok(selected)
    }
}

fn to_mover(rank: usize, row: &MarketTicker) -> MoverEntry {
    MoverEntry {
        rank,
        symbol: row.symbol.clone(),
        name: row.name.clone(),
        price: row.price,
        change_24h: row.change_24h,
    }
}
