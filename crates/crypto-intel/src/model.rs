//! Domain Models
//!
//! Core data types for the intelligence pipeline. Uses `rust_decimal` for
//! all market figures.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A snapshot quote for a single token.
///
/// Quotes have no identity beyond their symbol; a later quote for the same
/// token simply supersedes the cached one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenQuote {
    /// Ticker symbol (e.g., "BTC")
    pub symbol: String,

    /// Full name (e.g., "Bitcoin")
    pub name: String,

    /// Current price in USD
    pub price: Decimal,

    /// 24-hour price change percentage
    pub change_24h: Decimal,

    /// 24-hour high
    pub high_24h: Decimal,

    /// 24-hour low
    pub low_24h: Decimal,

    /// Market capitalization
    pub market_cap: Decimal,

    /// 24-hour trading volume
    pub volume_24h: Decimal,

    /// When the quote was taken
    pub as_of: DateTime<Utc>,
}

/// One row of the markets universe (top N by market cap)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTicker {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    pub change_24h: Decimal,
    pub volume_24h: Decimal,
    pub market_cap: Decimal,
}

/// A trending-search entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub symbol: String,
    pub name: String,
    /// 1-based rank within the trending list
    pub rank: usize,
    pub price: Decimal,
    pub change_24h: Decimal,
    pub volume_24h: Option<Decimal>,
    pub market_cap: Option<Decimal>,
}

/// Direction of a movers query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoverKind {
    Gainers,
    Losers,
}

impl std::fmt::Display for MoverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoverKind::Gainers => write!(f, "gainers"),
            MoverKind::Losers => write!(f, "losers"),
        }
    }
}

/// A top gainer or loser over the last 24h
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoverEntry {
    /// 1-based rank; losers rank worst first
    pub rank: usize,
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    pub change_24h: Decimal,
}

/// Sentiment classification of a text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Bullish"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::Negative => write!(f, "Bearish"),
        }
    }
}

/// A news article.
///
/// Lifecycle has two stages: freshly fetched (sentiment fields `None`) and
/// analyzed (fields populated by the sentiment lexicon).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
    pub sentiment_score: Option<f64>,
    pub sentiment_label: Option<SentimentLabel>,
}

impl NewsArticle {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            published_at: None,
            sentiment_score: None,
            sentiment_label: None,
        }
    }
}

/// Classified purpose of a user message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Price,
    Trending,
    Movers,
    News,
    Sentiment,
    Strategy,
    Compare,
    Help,
    General,
}

/// Risk tolerance extracted from a user message
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}
