//! # agent-runtime
//!
//! Runtime integrations for the crypto intelligence agent.
//!
//! ## Services
//!
//! - **ASI1**: chat-completion LLM used to rewrite synthesized responses
//!   into more natural language
//! - **Metta**: knowledge-graph lookup supplying contextual snippets
//!
//! Both are optional: each activates only when its API key is configured,
//! and every failure downgrades to the unenhanced response.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::Asi1Enhancer;
//!
//! let enhancer = Asi1Enhancer::from_env()?;
//! if enhancer.enabled() {
//!     let polished = enhancer.enhance(&draft, &query, None).await?;
//! }
//! ```

pub mod asi1;
pub mod metta;

pub use asi1::{Asi1Config, Asi1Enhancer};
pub use metta::{MettaConfig, MettaKnowledge};

// Re-export core types for convenience
pub use agent_core::{AgentError, Enhancer, EnhancerOptions, KnowledgeSource, Result};
