//! RSS/Atom News Client
//!
//! Fetches feed XML over HTTP and parses it with `feed-rs`, which handles
//! both RSS and Atom. Each fetch returns at most the three most recent
//! entries of one feed; aggregation across feeds happens in the news
//! service.

use async_trait::async_trait;
use std::time::Duration;

use super::NewsSource;
use crate::config::FeedSpec;
use crate::error::{IntelError, Result};
use crate::model::NewsArticle;

/// Entries kept per feed
const ENTRIES_PER_FEED: usize = 3;

/// HTTP + feed parser client
pub struct RssClient {
    client: reqwest::Client,
}

impl RssClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("crypto-intel/0.1")
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NewsSource for RssClient {
    async fn fetch(&self, feed: &FeedSpec) -> Result<Vec<NewsArticle>> {
        let response = self.client.get(&feed.url).send().await?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(IntelError::Status {
                status,
                endpoint: feed.name.clone(),
            });
        }

        let body = response.bytes().await?;
        let parsed = feed_rs::parser::parse(body.as_ref())
            .map_err(|e| IntelError::Feed(format!("{}: {e}", feed.name)))?;

        let mut articles: Vec<NewsArticle> = parsed
            .entries
            .into_iter()
            .map(|entry| {
                let mut article = NewsArticle::new(
                    entry
                        .title
                        .map(|t| t.content)
                        .unwrap_or_else(|| "No title".into()),
                    entry
                        .links
                        .first()
                        .map(|l| l.href.clone())
                        .unwrap_or_default(),
                    feed.name.clone(),
                );
                article.published_at = entry.published.or(entry.updated);
                article
            })
            .collect();

        // most recent first; undated entries sink to the end
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        articles.truncate(ENTRIES_PER_FEED);

        tracing::debug!(feed = %feed.name, count = articles.len(), "fetched feed");
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rss_payload() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example Feed</title>
    <item>
      <title>Bitcoin rallies</title>
      <link>https://example.com/a</link>
      <pubDate>Mon, 03 Aug 2026 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Markets steady</title>
      <link>https://example.com/b</link>
      <pubDate>Tue, 04 Aug 2026 10:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

        let parsed = feed_rs::parser::parse(xml.as_bytes()).unwrap();
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(
            parsed.entries[0].title.as_ref().unwrap().content,
            "Bitcoin rallies"
        );
        assert!(parsed.entries[0].published.is_some());
    }
}
