//! Project locator parsing and validation.

use crate::error::{GitLabError, Result};

const GITLAB_URL_PREFIX: &str = "https://gitlab.com/";

/// A validated reference to a GitLab project: either a namespaced path
/// taken from a gitlab.com URL, or a raw numeric project ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectLocator {
    /// Namespaced project path, e.g. `group/project`.
    Path(String),
    /// Numeric project ID.
    Id(u64),
}

impl ProjectLocator {
    /// Parse user input into a locator. Anything that is neither a
    /// `https://gitlab.com/...` URL nor all digits is rejected here,
    /// before any network activity.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if let Some(rest) = input.strip_prefix(GITLAB_URL_PREFIX) {
            let path = rest.trim_end_matches('/');
            if path.is_empty() {
                return Err(GitLabError::InvalidLocator(input.to_string()));
            }
            return Ok(Self::Path(path.to_string()));
        }
        if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
            let id = input
                .parse()
                .map_err(|_| GitLabError::InvalidLocator(input.to_string()))?;
            return Ok(Self::Id(id));
        }
        Err(GitLabError::InvalidLocator(input.to_string()))
    }

    /// Render the path segment used under `/api/v4/projects/`.
    /// Namespaced paths are percent-encoded (`group/project` -> `group%2Fproject`).
    pub fn api_path(&self) -> String {
        match self {
            Self::Path(path) => urlencoding::encode(path).into_owned(),
            Self::Id(id) => id.to_string(),
        }
    }
}

impl std::fmt::Display for ProjectLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{path}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_gitlab_url() {
        let locator = ProjectLocator::parse("https://gitlab.com/group/project").unwrap();
        assert_eq!(locator, ProjectLocator::Path("group/project".to_string()));
    }

    #[test]
    fn trims_trailing_slash() {
        let locator = ProjectLocator::parse("https://gitlab.com/group/project/").unwrap();
        assert_eq!(locator, ProjectLocator::Path("group/project".to_string()));
    }

    #[test]
    fn parses_numeric_id() {
        let locator = ProjectLocator::parse("12345").unwrap();
        assert_eq!(locator, ProjectLocator::Id(12345));
    }

    #[test]
    fn rejects_other_hosts() {
        let err = ProjectLocator::parse("https://example.com/group/project").unwrap_err();
        assert!(matches!(err, GitLabError::InvalidLocator(_)));
    }

    #[test]
    fn rejects_bare_words() {
        assert!(ProjectLocator::parse("not-a-project").is_err());
        assert!(ProjectLocator::parse("").is_err());
        assert!(ProjectLocator::parse("https://gitlab.com/").is_err());
    }

    #[test]
    fn api_path_encodes_namespace() {
        let locator = ProjectLocator::parse("https://gitlab.com/group/sub/project").unwrap();
        assert_eq!(locator.api_path(), "group%2Fsub%2Fproject");
        assert_eq!(ProjectLocator::Id(42).api_path(), "42");
    }
}
