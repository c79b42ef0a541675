//! Error taxonomy for the text-generation collaborators.

use thiserror::Error;

/// Errors surfaced by the question and synthesis engines.
///
/// The two callers treat these differently: question generation degrades to
/// an empty list (the process stays navigable via skip), while a synthesis
/// failure is fatal to that summary call and leaves the decision retryable.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    #[error("Authentication with the provider failed")]
    AuthenticationFailed,

    #[error("Rate limited by the provider; retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("Provider returned malformed output: {0}")]
    InvalidResponse(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

impl EngineError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        EngineError::Network(message.into())
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        EngineError::InvalidResponse(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        EngineError::Unavailable(message.into())
    }

    /// Returns true when a later retry of the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, EngineError::AuthenticationFailed)
    }
}
