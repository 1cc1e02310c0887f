//! GitLab REST client for user-scoped issue retrieval.
//!
//! Covers the small slice of the API this workspace needs: listing a
//! project's issues filtered by assignee or author (exhaustively
//! paginated) and fetching an issue's discussion thread. Everything is
//! strictly typed at the wire boundary; upstream failures surface as
//! [`GitLabError`], never as silently empty results.

mod client;
mod error;
mod locator;
mod types;

pub use client::{GitLabClient, Relation};
pub use error::{GitLabError, Result};
pub use locator::ProjectLocator;
pub use types::{Comment, Issue, IssueState, Thread, UserRef};
