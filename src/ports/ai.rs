//! AI collaborator ports: scam classification and persona replies.
//!
//! Both are opaque calls to an external language-understanding service.
//! Implementations translate between the provider API and our domain
//! types; the orchestrator treats any failure as transient and degrades
//! to a neutral path without mutating session state.

use async_trait::async_trait;

use crate::domain::persona::Persona;
use crate::domain::session::{Detection, Turn};

/// Port for classifying whether a conversation is a scam attempt.
#[async_trait]
pub trait ScamClassifier: Send + Sync {
    /// Classifies the inbound text given prior conversation turns.
    ///
    /// Called once per session, while no verdict is latched. Must complete
    /// within a bounded timeout; a failure leaves the session unclassified.
    async fn classify(&self, text: &str, history: &[Turn]) -> Result<Detection, AiError>;
}

/// Port for generating the persona's next reply.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Produces the outbound reply text for the locked persona.
    ///
    /// The reply must never reveal detection state to the counterparty.
    async fn generate_reply(
        &self,
        persona: &Persona,
        history: &[Turn],
        inbound: &str,
    ) -> Result<String, AiError>;
}

/// Errors from the AI service.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl AiError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// True if a later attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AiError::RateLimited { .. }
                | AiError::Unavailable { .. }
                | AiError::Network(_)
                | AiError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(AiError::RateLimited {
            retry_after_secs: 30
        }
        .is_retryable());
        assert!(AiError::unavailable("down").is_retryable());
        assert!(AiError::network("reset").is_retryable());
        assert!(AiError::Timeout { timeout_secs: 10 }.is_retryable());

        assert!(!AiError::AuthenticationFailed.is_retryable());
        assert!(!AiError::parse("bad json").is_retryable());
        assert!(!AiError::InvalidRequest("bad".into()).is_retryable());
    }

    #[test]
    fn errors_display_correctly() {
        let err = AiError::Timeout { timeout_secs: 15 };
        assert_eq!(err.to_string(), "request timed out after 15s");

        let err = AiError::unavailable("server error 503");
        assert_eq!(err.to_string(), "provider unavailable: server error 503");
    }
}
