//! Issue fetch orchestration: relation-filtered queries, merge, and
//! per-issue thread attachment.

use crate::aggregate::merge_by_relation;
use crate::error::{DigestError, Result};
use gitlab::{GitLabClient, Issue, ProjectLocator, Thread};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Which membership relations to include when fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    pub include_assignee: bool,
    pub include_author: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            include_assignee: true,
            include_author: true,
        }
    }
}

impl FetchOptions {
    /// Only issues assigned to the user.
    pub fn assignee_only() -> Self {
        Self {
            include_assignee: true,
            include_author: false,
        }
    }

    /// Only issues authored by the user.
    pub fn author_only() -> Self {
        Self {
            include_assignee: false,
            include_author: true,
        }
    }
}

/// Fetch the user's issues for both enabled relations and merge them
/// into the deduplicated aggregate order.
///
/// Both relations disabled is a valid no-op returning an empty
/// collection without touching the network. Any upstream error fails
/// the whole fetch; an empty result is never used to mask a failure.
pub async fn fetch_user_issues(
    client: &GitLabClient,
    project: &ProjectLocator,
    username: &str,
    options: FetchOptions,
) -> Result<Vec<Issue>> {
    if username.trim().is_empty() {
        return Err(DigestError::EmptyUsername);
    }
    if !options.include_assignee && !options.include_author {
        return Ok(Vec::new());
    }

    let assigned = if options.include_assignee {
        client.list_issues_by_assignee(project, username).await?
    } else {
        Vec::new()
    };
    let authored = if options.include_author {
        client.list_issues_by_author(project, username).await?
    } else {
        Vec::new()
    };

    let merged = merge_by_relation(assigned, authored);
    info!(project = %project, username, count = merged.len(), "aggregated issues");
    Ok(merged)
}

/// Attach each issue's discussion thread, one issue at a time in
/// aggregate order. A failed thread fetch becomes an inline
/// [`Thread::Failed`] marker on that issue only; the rest of the batch
/// is unaffected.
pub async fn attach_threads(
    client: &GitLabClient,
    project: &ProjectLocator,
    issues: &mut [Issue],
) {
    for issue in issues.iter_mut() {
        match client.list_comments(project, issue.iid).await {
            Ok(thread) => issue.comments = thread,
            Err(e) => {
                warn!(iid = issue.iid, error = %e, "failed to fetch thread");
                issue.comments = Thread::Failed {
                    error: format!("Failed to fetch comments: {e}"),
                };
            }
        }
    }
}
