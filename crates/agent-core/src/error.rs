//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Enhancement service error (bad status, empty completion, ...)
    #[error("Enhancement error: {0}")]
    Enhancement(String),

    /// Enhancement service unavailable or not responding
    #[error("Enhancer unavailable: {0}")]
    EnhancerUnavailable(String),

    /// Knowledge lookup error
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Session error
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AgentError::EnhancerUnavailable(_) | AgentError::Io(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Enhancement(_) | AgentError::EnhancerUnavailable(_) => {
                "The response service is temporarily degraded. Please try again.".into()
            }
            AgentError::Knowledge(_) => {
                "Contextual knowledge is temporarily unavailable.".into()
            }
            AgentError::Session(msg) => format!("Session problem: {}", msg),
            AgentError::Config(msg) => format!("Configuration problem: {}", msg),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        AgentError::Other(err.to_string())
    }
}
