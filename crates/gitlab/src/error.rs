//! Error types for the GitLab client.

use thiserror::Error;

/// Errors returned by the GitLab client.
#[derive(Error, Debug)]
pub enum GitLabError {
    /// Project locator is neither a gitlab.com URL nor a numeric project ID.
    /// Reported before any network attempt.
    #[error("invalid project locator: {0} (expected a https://gitlab.com/... URL or a numeric project ID)")]
    InvalidLocator(String),

    /// Authorization failed (401/403). A missing or expired token, or a
    /// private project without one.
    #[error("authorization failed (status {status}): {message}")]
    Auth {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Project or issue not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited (429).
    #[error("rate limited by GitLab; retry later")]
    RateLimited,

    /// API returned a non-success status not covered above.
    #[error("GitLab API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Result type for GitLab operations.
pub type Result<T> = std::result::Result<T, GitLabError>;
