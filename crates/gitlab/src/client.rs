//! HTTP client for the GitLab REST API (v4).

use crate::error::{GitLabError, Result};
use crate::locator::ProjectLocator;
use crate::types::{Issue, Note, Thread};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Default GitLab instance.
const DEFAULT_BASE_URL: &str = "https://gitlab.com";
const CONNECT_TIMEOUT_SECS: u64 = 8;
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Maximum page size GitLab allows.
const PER_PAGE: u32 = 100;

/// Which membership relation an issue listing filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Issues where the user is the assignee.
    Assignee,
    /// Issues where the user is the author.
    Author,
}

impl Relation {
    fn query_param(self) -> &'static str {
        match self {
            Self::Assignee => "assignee_username",
            Self::Author => "author_username",
        }
    }
}

/// GitLab API client.
///
/// Without a token only publicly visible projects are accessible.
#[derive(Clone)]
pub struct GitLabClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl GitLabClient {
    /// Create a client for gitlab.com with an optional private token.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Create a client against a custom GitLab instance.
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(GitLabError::Http)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            http,
        })
    }

    /// Create a client using `GITLAB_ACCESS_TOKEN` from the environment,
    /// if set.
    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var("GITLAB_ACCESS_TOKEN").ok())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v4/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// List all issues in the project matching the relation filter for
    /// `username`, across every state, following pagination exhaustively.
    pub async fn list_issues(
        &self,
        project: &ProjectLocator,
        relation: Relation,
        username: &str,
    ) -> Result<Vec<Issue>> {
        let url = self.url(&format!("projects/{}/issues", project.api_path()));
        info!(project = %project, relation = relation.query_param(), username, "fetching issues");
        self.fetch_all_pages(&url, &[(relation.query_param(), username), ("state", "all")])
            .await
    }

    /// Convenience wrapper for the assignee relation.
    pub async fn list_issues_by_assignee(
        &self,
        project: &ProjectLocator,
        username: &str,
    ) -> Result<Vec<Issue>> {
        self.list_issues(project, Relation::Assignee, username).await
    }

    /// Convenience wrapper for the author relation.
    pub async fn list_issues_by_author(
        &self,
        project: &ProjectLocator,
        username: &str,
    ) -> Result<Vec<Issue>> {
        self.list_issues(project, Relation::Author, username).await
    }

    /// Fetch one issue's full discussion thread, ascending by creation
    /// time, following pagination exhaustively.
    pub async fn list_comments(&self, project: &ProjectLocator, iid: u64) -> Result<Thread> {
        let url = self.url(&format!(
            "projects/{}/issues/{}/notes",
            project.api_path(),
            iid
        ));
        let notes: Vec<Note> = self
            .fetch_all_pages(&url, &[("sort", "asc"), ("order_by", "created_at")])
            .await?;
        let mut comments: Vec<_> = notes.into_iter().map(Note::into_comment).collect();
        // The API honors sort=asc; keep the canonical order a local guarantee.
        comments.sort_by_key(|c| (c.created_at, c.id));
        debug!(iid, count = comments.len(), "fetched thread");
        Ok(Thread::Loaded { comments })
    }

    /// Follow `x-next-page` until the listing is exhausted. No cap: a
    /// pathologically large project is a latency risk, not a correctness one.
    async fn fetch_all_pages<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page: u32 = 1;
        loop {
            let per_page = PER_PAGE.to_string();
            let page_str = page.to_string();
            let mut request = self
                .http
                .get(url)
                .query(query)
                .query(&[("per_page", per_page.as_str()), ("page", page_str.as_str())]);
            if let Some(token) = &self.token {
                request = request.header("PRIVATE-TOKEN", token);
            }
            let response = request.send().await.map_err(GitLabError::Http)?;
            let response = check_response(response).await?;
            let next_page = response
                .headers()
                .get("x-next-page")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u32>().ok());
            let body = response.text().await.map_err(GitLabError::Http)?;
            let mut batch: Vec<T> =
                serde_json::from_str(&body).map_err(|e| GitLabError::Decode(e.to_string()))?;
            let batch_len = batch.len();
            items.append(&mut batch);
            match next_page {
                Some(next) if batch_len > 0 => page = next,
                _ => break,
            }
        }
        Ok(items)
    }
}

async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let code = status.as_u16();
    let message = response.text().await.unwrap_or_default();
    Err(match code {
        401 | 403 => GitLabError::Auth {
            status: code,
            message,
        },
        404 => GitLabError::NotFound(message),
        429 => GitLabError::RateLimited,
        _ => GitLabError::Api {
            status: code,
            message,
        },
    })
}
