//! Pipeline error type.

use thiserror::Error;

/// Errors returned by the aggregation and summarization pipeline.
#[derive(Error, Debug)]
pub enum DigestError {
    /// Username was empty or whitespace. Rejected before any network
    /// activity.
    #[error("username must not be empty")]
    EmptyUsername,

    /// Summarization was requested for an empty issue collection.
    #[error("no issues provided for summarization")]
    NoIssues,

    /// Upstream tracker failure; the whole fetch fails as one unit.
    #[error(transparent)]
    Tracker(#[from] gitlab::GitLabError),

    /// Provider layer failure (including provider unavailability).
    #[error(transparent)]
    Llm(#[from] llm::LlmError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, DigestError>;
