//! Application State

use std::sync::Arc;

use agent_core::session::MemorySessionStore;
use crypto_intel::QueryHandler;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Query pipeline: intent routing, fetch, synthesis, enhancement
    pub handler: Arc<QueryHandler>,

    /// In-memory session store, one active session per user
    pub sessions: Arc<MemorySessionStore>,
}
