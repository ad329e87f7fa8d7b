//! News Aggregation Service
//!
//! Fans out to every configured feed concurrently, tolerates individual
//! feed failures, deduplicates by URL (first occurrence wins), and runs
//! sentiment analysis over the survivors. The aggregate is cached for 15
//! minutes under a single fingerprint; a single failing feed only costs its
//! own articles.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::cache::TtlCache;
use crate::config::{FeedSpec, IntelConfig};
use crate::error::Fetched;
use crate::limiter::RetryPolicy;
use crate::model::NewsArticle;
use crate::sentiment::SentimentAnalyzer;
use crate::source::NewsSource;

const CACHE_KEY: &str = "news:all";

/// News fetch service
pub struct NewsService {
    source: Arc<dyn NewsSource>,
    feeds: Vec<FeedSpec>,
    retry: RetryPolicy,
    ttl: Duration,
    cache: TtlCache<Vec<NewsArticle>>,
    analyzer: SentimentAnalyzer,
}

impl NewsService {
    pub fn new(source: Arc<dyn NewsSource>, config: &IntelConfig) -> Self {
        Self {
            source,
            feeds: config.feeds.clone(),
            retry: config.feed_retry.clone(),
            ttl: config.ttl.news,
            cache: TtlCache::new(),
            analyzer: SentimentAnalyzer::default(),
        }
    }

    /// Latest articles across all feeds, analyzed, most recent first.
    pub async fn latest(&self, limit: usize) -> Fetched<Vec<NewsArticle>> {
        if let Some(mut hit) = self.cache.get(CACHE_KEY) {
            hit.truncate(limit);
            return Fetched::Ok(hit);
        }

        let fetches = self.feeds.iter().map(|feed| async move {
            let outcome = self
                .retry
                .run(&feed.name, || self.source.fetch(feed))
                .await;
            (feed, outcome)
        });

        let mut articles = Vec::new();
        for (feed, outcome) in join_all(fetches).await {
            match outcome {
                Ok(entries) => articles.extend(entries),
                // a single feed failing does not fail the whole call
                Err(err) => {
                    tracing::warn!(feed = %feed.name, error = %err, "feed fetch failed");
                }
            }
        }

        let mut seen = HashSet::new();
        let mut unique: Vec<NewsArticle> = articles
            .into_iter()
            .filter(|a| !a.url.is_empty() && seen.insert(a.url.clone()))
            .collect();

        if unique.is_empty() {
            tracing::error!("no news available from any feed");
            return Fetched::Unavailable;
        }

        unique.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        self.analyzer.annotate(&mut unique);

        self.cache.insert(CACHE_KEY, unique.clone(), self.ttl);

        unique.truncate(limit);
        Fetched::Ok(unique)
    }
}
