//! End-to-end orchestration: fetch, thread attachment, provider
//! resolution, and the summary report.

use crate::error::{DigestError, Result};
use crate::fetch::{attach_threads, fetch_user_issues, FetchOptions};
use crate::prompt::PromptConfig;
use crate::summarize::{Summarizer, Summary};
use gitlab::{GitLabClient, Issue, ProjectLocator};
use llm::{ProviderKind, ProviderRegistry};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How deep the summary report goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryGranularity {
    /// One collection-level summary.
    #[default]
    Collection,
    /// Collection-level summary plus one summary per issue.
    Individual,
}

/// What to summarize and with which provider.
#[derive(Debug, Clone, Default)]
pub struct SummarizeRequest {
    pub granularity: SummaryGranularity,
    /// Free-text question; blank or whitespace falls back to the plain
    /// collection shape.
    pub query: Option<String>,
    /// Requested provider; unavailable ones fall back silently.
    pub provider: Option<ProviderKind>,
    /// Model override; defaults to the resolved provider's model.
    pub model: Option<String>,
}

/// A per-issue summary entry in an individual-granularity report.
#[derive(Debug)]
pub struct IssueSummary {
    pub iid: u64,
    pub title: String,
    pub summary: Summary,
}

/// The full summarization output for one issue collection.
#[derive(Debug)]
pub struct SummaryReport {
    /// Provider that actually served the calls (after any fallback).
    pub provider: ProviderKind,
    pub model: String,
    /// The query that shaped the collection summary, when one was given.
    pub query: Option<String>,
    pub collection: Summary,
    pub individual: Option<Vec<IssueSummary>>,
}

/// Summarize an issue collection.
///
/// The collection-level summary is always produced; individual
/// granularity adds one summary per issue on top. A non-blank query
/// redirects the collection shape to the query-directed prompt.
/// Provider resolution failure is the only hard error here; individual
/// call failures land inside each [`Summary`].
pub async fn summarize_issues(
    registry: &mut ProviderRegistry,
    issues: &[Issue],
    request: &SummarizeRequest,
    config: PromptConfig,
) -> Result<SummaryReport> {
    if issues.is_empty() {
        return Err(DigestError::NoIssues);
    }

    let resolved = registry.resolve(request.provider)?;
    let summarizer = Summarizer::new(&resolved, request.model.clone(), config);
    info!(
        provider = %summarizer.provider_kind(),
        model = summarizer.model(),
        count = issues.len(),
        "summarizing issue collection"
    );

    let query = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(String::from);

    let collection = match &query {
        Some(q) => summarizer.answer_query(q, issues).await,
        None => summarizer.summarize_collection(issues).await,
    };

    let individual = match request.granularity {
        SummaryGranularity::Collection => None,
        SummaryGranularity::Individual => {
            let mut entries = Vec::with_capacity(issues.len());
            for issue in issues {
                let summary = summarizer.summarize_issue(issue).await;
                entries.push(IssueSummary {
                    iid: issue.iid,
                    title: issue.title.clone(),
                    summary,
                });
            }
            Some(entries)
        }
    };

    Ok(SummaryReport {
        provider: summarizer.provider_kind(),
        model: summarizer.model().to_string(),
        query,
        collection,
        individual,
    })
}

/// Attach an LLM summary to every loaded comment in place. Failed calls
/// leave the comment unannotated; annotation never fails the batch.
pub async fn annotate_comments(summarizer: &Summarizer<'_>, issues: &mut [Issue]) {
    for issue in issues.iter_mut() {
        let iid = issue.iid;
        for comment in issue.comments.comments_mut() {
            match summarizer.summarize_comment(comment).await.result {
                Ok(text) => comment.llm_summary = Some(text),
                Err(e) => {
                    warn!(iid, comment = comment.id, error = %e, "comment annotation failed");
                }
            }
        }
    }
}

/// Fetch a user's issues from a project, with discussion threads
/// attached per issue.
pub async fn fetch(
    client: &GitLabClient,
    project: &str,
    username: &str,
    options: FetchOptions,
) -> Result<Vec<Issue>> {
    let locator = ProjectLocator::parse(project)?;
    let mut issues = fetch_user_issues(client, &locator, username, options).await?;
    attach_threads(client, &locator, &mut issues).await;
    Ok(issues)
}

/// Combined fetch-and-summarize input.
#[derive(Debug, Clone, Default)]
pub struct FetchAndSummarizeRequest {
    pub project: String,
    pub username: String,
    pub options: FetchOptions,
    /// When absent, only the fetch runs.
    pub summarize: Option<SummarizeRequest>,
    /// Annotate each fetched comment with its own one-line summary
    /// before the report is built.
    pub annotate_comments: bool,
}

/// Combined fetch-and-summarize output. Issues survive a summarization
/// failure; the failure is reported alongside them.
#[derive(Debug)]
pub struct FetchAndSummarizeOutput {
    pub issues: Vec<Issue>,
    pub count: usize,
    pub summary: Option<SummaryReport>,
    /// Set when fetching succeeded but summarization did not.
    pub summary_error: Option<String>,
}

/// Fetch then, when requested, summarize in one call.
///
/// A fetch failure aborts the whole operation. A summarization failure
/// does not discard the fetched issues: they are returned together with
/// the error message.
pub async fn fetch_and_summarize(
    client: &GitLabClient,
    registry: &mut ProviderRegistry,
    request: &FetchAndSummarizeRequest,
    config: PromptConfig,
) -> Result<FetchAndSummarizeOutput> {
    let mut issues = fetch(client, &request.project, &request.username, request.options).await?;
    let count = issues.len();

    let Some(summarize) = &request.summarize else {
        return Ok(FetchAndSummarizeOutput {
            issues,
            count,
            summary: None,
            summary_error: None,
        });
    };

    if request.annotate_comments {
        match registry.resolve(summarize.provider) {
            Ok(resolved) => {
                let summarizer =
                    Summarizer::new(&resolved, summarize.model.clone(), config.clone());
                annotate_comments(&summarizer, &mut issues).await;
            }
            Err(e) => {
                warn!(error = %e, "no provider for comment annotation; skipping");
            }
        }
    }

    match summarize_issues(registry, &issues, summarize, config).await {
        Ok(report) => Ok(FetchAndSummarizeOutput {
            issues,
            count,
            summary: Some(report),
            summary_error: None,
        }),
        Err(e) => {
            warn!(error = %e, "summarization failed; returning fetched issues");
            Ok(FetchAndSummarizeOutput {
                issues,
                count,
                summary: None,
                summary_error: Some(e.to_string()),
            })
        }
    }
}
