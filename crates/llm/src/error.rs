//! Error types for the provider layer.

use thiserror::Error;

/// Errors returned by LLM providers and the registry.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The named environment credential is not set.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// No provider has a credential; summarization is disabled.
    /// Distinct from any individual completion failure.
    #[error("no AI provider available; set GROQ_API_KEY or OPENAI_API_KEY")]
    NoProviderAvailable,

    /// The provider API returned a non-success status.
    #[error("provider API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body from the provider.
        message: String,
    },

    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion response was missing a choice or had empty content.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, LlmError>;
