//! Query Handler
//!
//! The one inbound operation of the core: classify a user message, extract
//! entities, fetch what the intent needs, synthesize a reply, then let the
//! optional enhancers polish it. Every failure path degrades to text; a
//! turn never surfaces an error to the transport.

use std::sync::Arc;

use futures::future::join_all;

use agent_core::enhancer::{Enhancer, KnowledgeSource};

use crate::config::DisplayLimits;
use crate::error::Fetched;
use crate::format;
use crate::market::MarketService;
use crate::model::{Intent, MoverKind, TokenQuote};
use crate::news::NewsService;
use crate::{extract, intent};

/// Routes user queries to services and formats responses
pub struct QueryHandler {
    market: MarketService,
    news: NewsService,
    limits: DisplayLimits,
    enhancer: Option<Arc<dyn Enhancer>>,
    knowledge: Option<Arc<dyn KnowledgeSource>>,
}

impl QueryHandler {
    pub fn new(market: MarketService, news: NewsService, limits: DisplayLimits) -> Self {
        Self {
            market,
            news,
            limits,
            enhancer: None,
            knowledge: None,
        }
    }

    /// Attach the optional LLM rewrite step
    pub fn with_enhancer(mut self, enhancer: Arc<dyn Enhancer>) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    /// Attach the optional knowledge lookup
    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeSource>) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    pub fn enhancer_enabled(&self) -> bool {
        self.enhancer.is_some()
    }

    pub fn knowledge_enabled(&self) -> bool {
        self.knowledge.is_some()
    }

    /// Handle one user turn.
    pub async fn handle_message(&self, text: &str, user_id: &str) -> String {
        tracing::info!(user = user_id, query = %text.chars().take(80).collect::<String>(), "handling query");

        let draft = self.route(text).await;
        self.enhance_best_effort(draft, text).await
    }

    async fn route(&self, text: &str) -> String {
        match intent::classify(text) {
            Intent::Price => {
                let tokens = extract::tokens(text);
                if tokens.is_empty() {
                    return format::price_prompt();
                }
                self.price_response(&tokens).await
            }

            Intent::Trending => {
                format::trending_response(&self.market.trending(self.limits.trending).await)
            }

            Intent::Movers => {
                let (gainers, losers) = tokio::join!(
                    self.market.movers(MoverKind::Gainers, self.limits.movers),
                    self.market.movers(MoverKind::Losers, self.limits.movers)
                );
                format::movers_response(&gainers, &losers)
            }

            // sentiment rides on the analyzed news listing
            Intent::News | Intent::Sentiment => {
                format::news_response(&self.news.latest(self.limits.news).await)
            }

            Intent::Strategy => format::strategy_response(extract::risk_level(text)),

            Intent::Compare => {
                let tokens = extract::tokens(text);
                if tokens.len() < 2 {
                    // clarification prompt; no fetch is attempted
                    return format::compare_prompt();
                }
                let (first, second) = self.market.quote_pair(&tokens[0], &tokens[1]).await;
                format::price_response(&[
                    (tokens[0].clone(), first),
                    (tokens[1].clone(), second),
                ])
            }

            Intent::Help => {
                format::help_response(self.enhancer_enabled(), self.knowledge_enabled())
            }

            Intent::General => {
                let tokens = extract::tokens(text);
                if tokens.is_empty() {
                    format::general_response()
                } else {
                    self.price_response(&tokens).await
                }
            }
        }
    }

    /// Concurrent per-token quotes; latency is the slowest single fetch
    async fn price_response(&self, tokens: &[String]) -> String {
        let quotes: Vec<Fetched<TokenQuote>> =
            join_all(tokens.iter().map(|t| self.market.quote(t))).await;

        let entries: Vec<(String, Fetched<TokenQuote>)> =
            tokens.iter().cloned().zip(quotes).collect();
        format::price_response(&entries)
    }

    /// Knowledge lookup and LLM rewrite, both strictly best-effort: any
    /// error keeps the synthesized draft and is only logged.
    async fn enhance_best_effort(&self, draft: String, query: &str) -> String {
        let Some(enhancer) = &self.enhancer else {
            return draft;
        };

        let knowledge = match &self.knowledge {
            Some(source) => match source.lookup(query).await {
                Ok(snippet) => snippet,
                Err(err) => {
                    tracing::warn!(error = %err, "knowledge lookup failed");
                    None
                }
            },
            None => None,
        };

        match enhancer.enhance(&draft, query, knowledge.as_deref()).await {
            Ok(enhanced) => enhanced,
            Err(err) => {
                tracing::warn!(error = %err, "enhancement failed, returning draft");
                draft
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntelConfig;
    use crate::limiter::{RateLimiter, RetryPolicy};
    use crate::source::{MockMarketSource, NewsSource};
    use agent_core::error::{AgentError, Result as AgentResult};
    use async_trait::async_trait;
    use std::time::Duration;

    struct EmptyFeeds;

    #[async_trait]
    impl NewsSource for EmptyFeeds {
        async fn fetch(
            &self,
            _feed: &crate::config::FeedSpec,
        ) -> crate::error::Result<Vec<crate::model::NewsArticle>> {
            Ok(Vec::new())
        }
    }

    fn handler_with(source: Arc<MockMarketSource>) -> QueryHandler {
        let mut config = IntelConfig::default();
        config.retry = RetryPolicy::new(3, Duration::from_millis(10), Duration::from_secs(1));

        let market = MarketService::new(source, Arc::new(RateLimiter::new()), &config);
        let news = NewsService::new(Arc::new(EmptyFeeds), &config);
        QueryHandler::new(market, news, config.limits)
    }

    #[tokio::test(start_paused = true)]
    async fn test_price_turn() {
        let source = Arc::new(MockMarketSource::new());
        let handler = handler_with(source);

        let reply = handler.handle_message("What's the price of Bitcoin?", "u1").await;
        assert!(reply.contains("Bitcoin (BTC)"));
        assert!(reply.contains("Price: $97500.00"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_price_turn_without_token_prompts() {
        let source = Arc::new(MockMarketSource::new());
        let handler = handler_with(source.clone());

        let reply = handler.handle_message("what's the price?", "u1").await;
        assert_eq!(reply, format::price_prompt());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_compare_with_one_token_is_clarified_without_fetch() {
        let source = Arc::new(MockMarketSource::new());
        let handler = handler_with(source.clone());

        let reply = handler.handle_message("compare bitcoin", "u1").await;
        assert_eq!(reply, format::compare_prompt());
        // no network call was attempted
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_compare_fetches_both_tokens() {
        let source = Arc::new(MockMarketSource::new());
        let handler = handler_with(source.clone());

        let reply = handler.handle_message("Compare BTC and ETH", "u1").await;
        assert!(reply.contains("Bitcoin (BTC)"));
        assert!(reply.contains("Ethereum (ETH)"));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_price_renders_degraded_line() {
        let source = Arc::new(MockMarketSource::failing(10));
        let handler = handler_with(source);

        let reply = handler.handle_message("bitcoin price", "u1").await;
        assert!(reply.contains("Could not fetch data for bitcoin"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_general_with_token_falls_back_to_price() {
        let source = Arc::new(MockMarketSource::new());
        let handler = handler_with(source);

        let reply = handler.handle_message("tell me about solana", "u1").await;
        assert!(reply.contains("Solana (SOL)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_general_without_token_is_fallback() {
        let source = Arc::new(MockMarketSource::new());
        let handler = handler_with(source);

        let reply = handler.handle_message("asdkfj random text", "u1").await;
        assert_eq!(reply, format::general_response());
    }

    #[tokio::test(start_paused = true)]
    async fn test_strategy_turn_uses_risk_level() {
        let source = Arc::new(MockMarketSource::new());
        let handler = handler_with(source);

        let reply = handler
            .handle_message("give me a low risk investment strategy", "u1")
            .await;
        assert!(reply.contains("LOW-RISK INVESTMENT STRATEGY"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_movers_turn() {
        let source = Arc::new(MockMarketSource::new());
        let handler = handler_with(source);

        let reply = handler.handle_message("top gainers today", "u1").await;
        assert!(reply.contains("TOP GAINERS"));
        assert!(reply.contains("TOP LOSERS"));
        assert!(reply.contains("Dogecoin (DOGE)"));
    }

    // --- enhancer fallback ---

    struct FailingEnhancer;

    #[async_trait]
    impl Enhancer for FailingEnhancer {
        async fn enhance(
            &self,
            _draft: &str,
            _query: &str,
            _knowledge: Option<&str>,
        ) -> AgentResult<String> {
            Err(AgentError::Enhancement("insufficient content".into()))
        }

        async fn health_check(&self) -> AgentResult<bool> {
            Ok(false)
        }
    }

    struct UppercasingEnhancer;

    #[async_trait]
    impl Enhancer for UppercasingEnhancer {
        async fn enhance(
            &self,
            draft: &str,
            _query: &str,
            _knowledge: Option<&str>,
        ) -> AgentResult<String> {
            Ok(draft.to_uppercase())
        }

        async fn health_check(&self) -> AgentResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_enhancer_keeps_draft_exactly() {
        let source = Arc::new(MockMarketSource::new());
        let plain = handler_with(source.clone());
        let expected = plain.handle_message("bitcoin price", "u1").await;

        let enhanced_handler =
            handler_with(source).with_enhancer(Arc::new(FailingEnhancer));
        let reply = enhanced_handler.handle_message("bitcoin price", "u1").await;

        assert_eq!(reply, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_working_enhancer_rewrites() {
        let source = Arc::new(MockMarketSource::new());
        let handler = handler_with(source).with_enhancer(Arc::new(UppercasingEnhancer));

        let reply = handler.handle_message("help", "u1").await;
        assert!(reply.contains("EXAMPLE QUERIES"));
    }
}
