//! Issue aggregation and AI summarization pipeline.
//!
//! Fetches a user's GitLab issues across the assignee and author
//! relations, merges them into one deduplicated collection, attaches
//! discussion threads with per-issue failure markers, and produces
//! LLM summaries at collection or individual granularity through a
//! provider registry with credential-based fallback.
//!
//! ```ignore
//! use digest::{fetch_and_summarize, FetchAndSummarizeRequest, PromptConfig};
//! use gitlab::GitLabClient;
//! use llm::ProviderRegistry;
//!
//! let client = GitLabClient::from_env()?;
//! let mut registry = ProviderRegistry::from_env();
//! let request = FetchAndSummarizeRequest {
//!     project: "https://gitlab.com/group/project".to_string(),
//!     username: "alice".to_string(),
//!     summarize: Some(Default::default()),
//!     ..Default::default()
//! };
//! let output = fetch_and_summarize(&client, &mut registry, &request, PromptConfig::default()).await?;
//! ```

pub mod aggregate;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod prompt;
pub mod summarize;

pub use aggregate::merge_by_relation;
pub use error::{DigestError, Result};
pub use fetch::{attach_threads, fetch_user_issues, FetchOptions};
pub use pipeline::{
    annotate_comments, fetch, fetch_and_summarize, summarize_issues, FetchAndSummarizeOutput,
    FetchAndSummarizeRequest, IssueSummary, SummarizeRequest, SummaryGranularity, SummaryReport,
};
pub use prompt::{collection_prompt, comment_prompt, issue_prompt, query_prompt, Prompt, PromptConfig};
pub use summarize::{Summarizer, Summary};
