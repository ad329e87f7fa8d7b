//! Upstream Data Sources
//!
//! Trait seams for the market data API and the news feeds. Services depend
//! on these traits so tests can substitute mocks and count calls.

mod coingecko;
mod mock;
mod rss;

pub use coingecko::CoinGeckoClient;
pub use mock::MockMarketSource;
pub use rss::RssClient;

use async_trait::async_trait;

use crate::config::FeedSpec;
use crate::error::Result;
use crate::model::{MarketTicker, NewsArticle, TokenQuote, TrendingEntry};

/// Market data source (Strategy pattern).
///
/// A 404 from the upstream maps to [`crate::error::IntelError::NotFound`];
/// implementations must not swallow failures.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Full quote for a canonical token id
    async fn coin(&self, id: &str) -> Result<TokenQuote>;

    /// Top tokens by market cap, 24h change included
    async fn markets(&self, per_page: usize) -> Result<Vec<MarketTicker>>;

    /// Currently trending tokens
    async fn trending(&self) -> Result<Vec<TrendingEntry>>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// News feed source
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch and parse one feed, most recent entries first
    async fn fetch(&self, feed: &FeedSpec) -> Result<Vec<NewsArticle>>;
}
