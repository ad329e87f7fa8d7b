//! Metta Knowledge Graph Client
//!
//! Implementation of `KnowledgeSource` against the knowledge-graph query
//! API. Returns a short bulleted context snippet, or `None` when the graph
//! has nothing relevant.

use std::time::Duration;

use agent_core::{
    enhancer::KnowledgeSource,
    error::{AgentError, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Knowledge items rendered into the snippet
const SNIPPET_ITEMS: usize = 3;

/// Metta client configuration
#[derive(Clone, Debug)]
pub struct MettaConfig {
    /// Query endpoint URL
    pub api_url: String,

    /// Bearer token; lookups are disabled when absent
    pub api_key: Option<String>,

    /// Maximum results requested per query
    pub max_results: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MettaConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.metta.ai/v1/query".into(),
            api_key: None,
            max_results: 5,
            timeout_secs: 15,
        }
    }
}

impl MettaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("METTA_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("METTA_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            max_results: defaults.max_results,
            timeout_secs: defaults.timeout_secs,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct KnowledgeQuery<'a> {
    query: &'a str,
    max_results: u32,
    include_context: bool,
    domain: &'a str,
}

#[derive(Debug, Deserialize)]
struct KnowledgeResponse {
    #[serde(default)]
    results: Vec<KnowledgeItem>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

/// Metta knowledge-graph lookup
pub struct MettaKnowledge {
    client: reqwest::Client,
    config: MettaConfig,
}

impl MettaKnowledge {
    pub fn new(config: MettaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(MettaConfig::from_env())
    }

    /// Whether an API key is configured
    pub fn enabled(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn render_snippet(items: &[KnowledgeItem]) -> String {
        items
            .iter()
            .take(SNIPPET_ITEMS)
            .map(|item| {
                format!(
                    "- {}: {}",
                    item.title.as_deref().unwrap_or("N/A"),
                    item.summary.as_deref().unwrap_or("N/A")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl KnowledgeSource for MettaKnowledge {
    async fn lookup(&self, topic: &str) -> Result<Option<String>> {
        let Some(api_key) = &self.config.api_key else {
            return Ok(None);
        };

        let query = KnowledgeQuery {
            query: topic,
            max_results: self.config.max_results,
            include_context: true,
            domain: "cryptocurrency",
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&query)
            .send()
            .await
            .map_err(|e| AgentError::Knowledge(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Knowledge(format!(
                "API returned status {status}"
            )));
        }

        let body: KnowledgeResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Knowledge(e.to_string()))?;

        if body.results.is_empty() {
            return Ok(None);
        }

        tracing::info!(items = body.results.len(), "knowledge context retrieved");
        Ok(Some(Self::render_snippet(&body.results)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MettaConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.max_results, 5);
    }

    #[test]
    fn test_response_decoding_and_snippet() {
        let body = r#"{
            "results": [
                {"title": "Bitcoin", "summary": "Largest cryptocurrency by market cap"},
                {"title": "Halving", "summary": "Supply issuance halves every four years"},
                {"title": "Lightning", "summary": "Layer-2 payment network"},
                {"title": "Extra", "summary": "Should be cut from the snippet"}
            ]
        }"#;

        let parsed: KnowledgeResponse = serde_json::from_str(body).unwrap();
        let snippet = MettaKnowledge::render_snippet(&parsed.results);

        assert!(snippet.contains("- Bitcoin: Largest cryptocurrency by market cap"));
        assert!(snippet.contains("- Lightning:"));
        assert!(!snippet.contains("Extra"));
    }

    #[tokio::test]
    async fn test_lookup_without_key_is_none() {
        let knowledge = MettaKnowledge::new(MettaConfig::default()).unwrap();
        assert!(!knowledge.enabled());
        assert_eq!(knowledge.lookup("bitcoin").await.unwrap(), None);
    }
}
