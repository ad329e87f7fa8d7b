//! Enhancer Strategy Pattern
//!
//! Defines the narrow interface between the response pipeline and the
//! optional enhancement services: an LLM rewrite step and a knowledge-graph
//! lookup. Both are strictly best-effort — callers must fall back to the
//! unenhanced text when an implementation returns an error.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::enhancer::Enhancer;
//!
//! let enhanced = match enhancer.enhance(&draft, &query, knowledge.as_deref()).await {
//!     Ok(text) => text,
//!     Err(e) => {
//!         tracing::warn!("enhancement failed: {}", e);
//!         draft
//!     }
//! };
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Generation parameters for the enhancement call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnhancerOptions {
    /// Model identifier sent to the enhancement service
    pub model: String,

    /// Temperature for sampling
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2000
}

impl Default for EnhancerOptions {
    fn default() -> Self {
        Self {
            model: "asi1-mini".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Strategy trait for response enhancement services.
///
/// Implementations must preserve every factual figure in `draft` and must
/// treat empty or truncated completions as errors rather than returning
/// them. Surfacing an error here never fails the user turn: the caller
/// keeps the original draft.
#[async_trait]
pub trait Enhancer: Send + Sync {
    /// Rewrite a synthesized response into more natural language.
    ///
    /// `knowledge` carries an optional context snippet from a
    /// [`KnowledgeSource`] lookup for the same query.
    async fn enhance(
        &self,
        draft: &str,
        query: &str,
        knowledge: Option<&str>,
    ) -> Result<String>;

    /// Check if the service is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;
}

/// Strategy trait for contextual knowledge lookups.
///
/// Returns `None` when nothing relevant is known; callers additionally
/// swallow errors to `None` so a lookup failure never gates a response.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Look up contextual knowledge for a topic
    async fn lookup(&self, topic: &str) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let opts = EnhancerOptions::default();
        assert_eq!(opts.temperature, 0.7);
        assert_eq!(opts.max_tokens, 2000);
    }
}
