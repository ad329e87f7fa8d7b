//! # agent-core
//!
//! Core chat primitives for the crypto intelligence agent: message and
//! session types shared across crates, the error taxonomy, and the
//! enhancer abstractions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Chat Transport                          │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  ChatContent│  │   Session   │  │   Enhancer /        │  │
//! │  │  (tagged)   │──│   Store     │──│   KnowledgeSource   │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Enhancer` trait lets the response pipeline hand its synthesized
//! text to an optional LLM rewrite service; `KnowledgeSource` supplies
//! optional contextual snippets. Both are strictly best-effort: callers
//! fall back to the unenhanced text on any error.

pub mod enhancer;
pub mod error;
pub mod message;
pub mod session;

pub use enhancer::{Enhancer, EnhancerOptions, KnowledgeSource};
pub use error::{AgentError, Result};
pub use message::{ChatContent, Conversation, Message, Role};
pub use session::{Session, SessionId, SessionStore};
