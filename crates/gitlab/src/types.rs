//! Issue and discussion types as returned by the GitLab REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user embedded in an issue or note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Unique handle.
    pub username: String,
    /// Display name.
    pub name: String,
}

/// Issue state. Open enum: GitLab may grow new states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Opened,
    Closed,
    #[serde(untagged)]
    Other(String),
}

impl IssueState {
    /// The wire string for this state.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single comment in an issue's discussion thread, flattened from the
/// API's note shape (the author object is reduced to its username).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique within the issue's thread.
    pub id: u64,
    /// Author username.
    pub author: String,
    /// Comment text.
    pub body: String,
    /// Creation time; threads are ordered ascending by this.
    pub created_at: DateTime<Utc>,
    /// AI summary, attached only when comment summarization was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_summary: Option<String>,
}

/// Per-issue thread state. Threads are attached after the issue fetch;
/// a failed thread fetch is captured here instead of failing the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Thread {
    /// Thread has not been requested yet.
    #[default]
    NotFetched,
    /// Thread fetched, ascending by creation time.
    Loaded {
        comments: Vec<Comment>,
    },
    /// Thread fetch failed for this issue only.
    Failed {
        error: String,
    },
}

impl Thread {
    /// Loaded comments, or empty for unfetched/failed threads.
    pub fn comments(&self) -> &[Comment] {
        match self {
            Self::Loaded { comments } => comments,
            _ => &[],
        }
    }

    /// Mutable access to loaded comments.
    pub fn comments_mut(&mut self) -> &mut [Comment] {
        match self {
            Self::Loaded { comments } => comments,
            _ => &mut [],
        }
    }

    /// The error marker, if the thread fetch failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// A GitLab issue.
///
/// `iid` is the project-scoped sequence number and the dedup key when
/// merging result sets within one project; `id` is globally unique but
/// never used for dedup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Project-scoped issue number.
    pub iid: u64,
    /// Global issue ID.
    pub id: u64,
    pub title: String,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub author: UserRef,
    /// Absent means unassigned.
    #[serde(default)]
    pub assignee: Option<UserRef>,
    #[serde(default)]
    pub description: Option<String>,
    pub web_url: String,
    /// Discussion thread, attached after fetch.
    #[serde(default)]
    pub comments: Thread,
}

/// Wire shape of a note from `GET .../issues/:iid/notes`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Note {
    pub id: u64,
    pub author: UserRef,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub(crate) fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            author: self.author.username,
            body: self.body,
            created_at: self.created_at,
            llm_summary: None,
        }
    }
}
