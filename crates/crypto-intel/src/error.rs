//! Error Types for the Intelligence Core
//!
//! Fetchers resolve every failure to the tagged [`Fetched`] outcome before
//! it reaches response synthesis; `IntelError` exists below that boundary,
//! where the retry layer decides what is transient.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntelError>;

#[derive(Error, Debug)]
pub enum IntelError {
    /// Upstream explicitly reported the entity does not exist (HTTP 404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Upstream returned a non-success status
    #[error("{endpoint} returned status {status}")]
    Status { status: u16, endpoint: String },

    /// Network failure: timeout, connection reset, DNS, TLS
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Feed payload could not be parsed
    #[error("feed error: {0}")]
    Feed(String),

    /// JSON decode error
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl IntelError {
    /// Whether the retry layer should attempt this call again.
    ///
    /// A 404 is a legitimate "no such token" answer and is never retried;
    /// other 4xx responses would fail identically on retry. Server errors,
    /// throttling, and network failures are transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            IntelError::Network(_) => true,
            IntelError::Status { status, .. } => *status >= 500 || *status == 429,
            IntelError::NotFound(_)
            | IntelError::Feed(_)
            | IntelError::Decode(_)
            | IntelError::Config(_) => false,
        }
    }
}

/// Tagged outcome of a data fetch.
///
/// Response synthesis is total over these tags: `NotFound` renders a
/// "couldn't find X" line, `Unavailable` a graceful degraded message.
/// Fetchers never leak an `IntelError` past this boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetched<T> {
    Ok(T),
    NotFound,
    Unavailable,
}

impl<T> Fetched<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Fetched::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Fetched::Ok(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability() {
        assert!(!IntelError::NotFound("dogecoin".into()).is_retryable());
        assert!(
            IntelError::Status { status: 503, endpoint: "markets".into() }.is_retryable()
        );
        assert!(
            IntelError::Status { status: 429, endpoint: "markets".into() }.is_retryable()
        );
        assert!(
            !IntelError::Status { status: 400, endpoint: "markets".into() }.is_retryable()
        );
        assert!(!IntelError::Feed("bad xml".into()).is_retryable());
    }
}
