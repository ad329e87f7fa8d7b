//! Configuration
//!
//! Per-component settings with environment overrides. Everything has a
//! working default: the public market API needs no key, and the RSS feeds
//! are free.

use std::time::Duration;

use crate::limiter::RetryPolicy;

/// Market data API settings
#[derive(Clone, Debug)]
pub struct MarketConfig {
    /// REST API base URL
    pub base_url: String,

    /// Optional demo/pro API key for higher rate limits
    pub api_key: Option<String>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl MarketConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("COINGECKO_BASE_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("COINGECKO_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            timeout: defaults.timeout,
        }
    }
}

/// A named RSS/Atom feed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedSpec {
    pub name: String,
    pub url: String,
}

impl FeedSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Default news sources
pub fn default_feeds() -> Vec<FeedSpec> {
    vec![
        FeedSpec::new("CoinDesk", "https://www.coindesk.com/arc/outboundfeeds/rss/"),
        FeedSpec::new("CoinTelegraph", "https://cointelegraph.com/rss"),
        FeedSpec::new("Bitcoin Magazine", "https://bitcoinmagazine.com/.rss/full/"),
        FeedSpec::new("Decrypt", "https://decrypt.co/feed"),
        FeedSpec::new("CryptoSlate", "https://cryptoslate.com/feed/"),
    ]
}

/// Cache TTL per data kind
#[derive(Clone, Debug)]
pub struct CacheTtl {
    pub price: Duration,
    pub trending: Duration,
    pub movers: Duration,
    pub news: Duration,
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            price: Duration::from_secs(120),
            trending: Duration::from_secs(300),
            movers: Duration::from_secs(300),
            news: Duration::from_secs(900),
        }
    }
}

/// Call budget for one logical endpoint
#[derive(Clone, Copy, Debug)]
pub struct RateBudget {
    pub max_calls: u32,
    pub period: Duration,
}

impl Default for RateBudget {
    fn default() -> Self {
        // free-tier market API allowance
        Self {
            max_calls: 50,
            period: Duration::from_secs(60),
        }
    }
}

/// How many entries each listing renders
#[derive(Clone, Copy, Debug)]
pub struct DisplayLimits {
    pub trending: usize,
    pub movers: usize,
    pub news: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            trending: 7,
            movers: 5,
            news: 5,
        }
    }
}

/// Top-level configuration for the intelligence core
#[derive(Clone, Debug)]
pub struct IntelConfig {
    pub market: MarketConfig,
    pub feeds: Vec<FeedSpec>,
    pub ttl: CacheTtl,
    pub market_budget: RateBudget,
    pub retry: RetryPolicy,
    /// Feeds get a shorter retry budget: partial results are acceptable
    pub feed_retry: RetryPolicy,
    pub limits: DisplayLimits,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            feeds: default_feeds(),
            ttl: CacheTtl::default(),
            market_budget: RateBudget::default(),
            retry: RetryPolicy::default(),
            feed_retry: RetryPolicy::new(2, Duration::from_secs(1), Duration::from_secs(60)),
            limits: DisplayLimits::default(),
        }
    }
}

impl IntelConfig {
    pub fn from_env() -> Self {
        Self {
            market: MarketConfig::from_env(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntelConfig::default();
        assert_eq!(config.ttl.price, Duration::from_secs(120));
        assert_eq!(config.ttl.news, Duration::from_secs(900));
        assert_eq!(config.market_budget.max_calls, 50);
        assert_eq!(config.feeds.len(), 5);
        assert_eq!(config.feed_retry.max_retries, 2);
    }
}
