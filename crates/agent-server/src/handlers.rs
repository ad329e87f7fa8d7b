//! HTTP Handlers
//!
//! One chat endpoint carrying the tagged content union, plus a health
//! check. Each `ChatContent` variant is matched exhaustively: adding a
//! variant breaks the build here instead of silently dropping messages.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use agent_core::{
    message::{ChatContent, Message},
    session::{Session, SessionStore},
};
use crypto_intel::format;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub llm_enhancement: bool,
    pub knowledge_graph: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub content: ChatContent,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

const WELCOME: &str = "Welcome to the Crypto Intelligence Agent!\n\n\
I can help you with:\n\
  - Live prices, market cap, volume, and 24h changes\n\
  - Trending tokens and top movers\n\
  - Latest news with sentiment analysis\n\
  - Risk-stratified investment strategies (Low/Medium/High)\n\
  - Token comparisons\n\n\
Try asking:\n\
  \"What's the Bitcoin price?\"\n\
  \"Show me trending cryptocurrencies\"\n\
  \"Give me a medium-risk investment strategy\"\n\n\
Type 'help' anytime to see all capabilities.";

const FAREWELL: &str =
    "Session ended. Thank you for using the Crypto Intelligence Agent! Stay informed and invest wisely.";

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        llm_enhancement: state.handler.enhancer_enabled(),
        knowledge_graph: state.handler.knowledge_enabled(),
    })
}

/// Chat endpoint: one request per user turn
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let user_id = payload.user_id;

    match payload.content {
        ChatContent::StartSession => {
            let session = Session::for_user(&user_id);
            let session_id = session.id.to_string();
            if let Err(e) = state.sessions.save(&session) {
                tracing::error!(error = %e, "failed to save session");
                return Json(ChatResponse {
                    reply: format::error_response(),
                    session_id: None,
                });
            }

            tracing::info!(user = %user_id, session = %session_id, "session started");
            Json(ChatResponse {
                reply: WELCOME.into(),
                session_id: Some(session_id),
            })
        }

        ChatContent::Text { text } => {
            let reply = state.handler.handle_message(&text, &user_id).await;

            // record the turn when the user has an open session
            let session_id = match state.sessions.find_active(&user_id) {
                Ok(Some(mut session)) => {
                    session.conversation.push(Message::user(&text));
                    session.conversation.push(Message::assistant(&reply));
                    session.touch();
                    let id = session.id.to_string();
                    if let Err(e) = state.sessions.save(&session) {
                        tracing::warn!(error = %e, "failed to persist turn");
                    }
                    Some(id)
                }
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "session lookup failed");
                    None
                }
            };

            Json(ChatResponse { reply, session_id })
        }

        ChatContent::EndSession => {
            match state.sessions.find_active(&user_id) {
                Ok(Some(mut session)) => {
                    session.end();
                    let id = session.id.to_string();
                    if let Err(e) = state.sessions.save(&session) {
                        tracing::warn!(error = %e, "failed to close session");
                    }
                    tracing::info!(user = %user_id, session = %id, "session ended");
                    Json(ChatResponse {
                        reply: FAREWELL.into(),
                        session_id: Some(id),
                    })
                }
                _ => Json(ChatResponse {
                    reply: FAREWELL.into(),
                    session_id: None,
                }),
            }
        }

        ChatContent::Ack { msg_id } => {
            tracing::info!(user = %user_id, msg_id = %msg_id, "received ack");
            Json(ChatResponse {
                reply: String::new(),
                session_id: None,
            })
        }
    }
}
