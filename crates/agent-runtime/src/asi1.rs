//! ASI1 LLM Enhancer
//!
//! Implementation of `Enhancer` against a chat-completion-style HTTP API.
//! The enhancer receives the synthesized data response and rewrites it into
//! more conversational language without touching any figure.

use std::time::Duration;

use agent_core::{
    enhancer::{Enhancer, EnhancerOptions},
    error::{AgentError, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A completion shorter than this is treated as a failed enhancement
const MIN_COMPLETION_CHARS: usize = 50;

const SYSTEM_PROMPT: &str = "You are an advanced cryptocurrency intelligence assistant. \
Your role is to provide clear, accurate, and helpful responses about cryptocurrency \
prices, news, and investment strategies.\n\n\
When enhancing responses:\n\
- Maintain all factual data and numbers exactly as provided\n\
- Make the language more conversational and natural\n\
- Add helpful context where appropriate\n\
- Keep the professional tone\n\
- Do not add information not present in the original response\n\
- Preserve all formatting (bullet points, sections, etc.)";

/// ASI1 provider configuration
#[derive(Clone, Debug)]
pub struct Asi1Config {
    /// Chat-completions endpoint URL
    pub api_url: String,

    /// Bearer token; the enhancer is disabled when absent
    pub api_key: Option<String>,

    /// Generation parameters
    pub options: EnhancerOptions,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Asi1Config {
    fn default() -> Self {
        Self {
            api_url: "https://api.asi1.ai/v1/chat/completions".into(),
            api_key: None,
            options: EnhancerOptions::default(),
            timeout_secs: 30,
        }
    }
}

impl Asi1Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut options = EnhancerOptions::default();
        if let Ok(model) = std::env::var("ASI1_MODEL") {
            options.model = model;
        }

        Self {
            api_url: std::env::var("ASI1_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("ASI1_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            options,
            timeout_secs: defaults.timeout_secs,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// ASI1 LLM enhancer
pub struct Asi1Enhancer {
    client: reqwest::Client,
    config: Asi1Config,
}

impl Asi1Enhancer {
    pub fn new(config: Asi1Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(Asi1Config::from_env())
    }

    /// Whether an API key is configured
    pub fn enabled(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn build_user_message(draft: &str, query: &str, knowledge: Option<&str>) -> String {
        let mut message = format!("Original Data Response:\n{draft}\n\nUser Query: {query}");
        if let Some(context) = knowledge {
            message.push_str(&format!("\n\nAdditional Knowledge Context:\n{context}"));
        }
        message.push_str(
            "\n\nPlease enhance this response to be more conversational while \
             maintaining all factual accuracy and data.",
        );
        message
    }
}

#[async_trait]
impl Enhancer for Asi1Enhancer {
    async fn enhance(
        &self,
        draft: &str,
        query: &str,
        knowledge: Option<&str>,
    ) -> Result<String> {
        let Some(api_key) = &self.config.api_key else {
            return Err(AgentError::Config("ASI1 API key not configured".into()));
        };

        let user_message = Self::build_user_message(draft, query, knowledge);
        let request = ChatRequest {
            model: &self.config.options.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                WireMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
            temperature: self.config.options.temperature,
            max_tokens: self.config.options.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::EnhancerUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Enhancement(format!(
                "API returned status {status}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Enhancement(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        if content.len() < MIN_COMPLETION_CHARS {
            return Err(AgentError::Enhancement(
                "enhancement produced insufficient content".into(),
            ));
        }

        tracing::info!("response successfully enhanced");
        Ok(content)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.enabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Asi1Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_response_decoding() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Bitcoin is trading at $97,500 today."}}
            ]
        }"#;

        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content,
            "Bitcoin is trading at $97,500 today."
        );
    }

    #[test]
    fn test_user_message_carries_knowledge_context() {
        let message = Asi1Enhancer::build_user_message(
            "BTC: $97,500",
            "bitcoin price",
            Some("- Bitcoin: largest cryptocurrency by market cap"),
        );
        assert!(message.contains("Original Data Response:"));
        assert!(message.contains("Additional Knowledge Context:"));
        assert!(message.contains("User Query: bitcoin price"));
    }

    #[tokio::test]
    async fn test_enhance_without_key_errors() {
        let enhancer = Asi1Enhancer::new(Asi1Config::default()).unwrap();
        assert!(!enhancer.enabled());

        let result = enhancer.enhance("draft text", "query", None).await;
        assert!(matches!(result, Err(AgentError::Config(_))));
    }
}
