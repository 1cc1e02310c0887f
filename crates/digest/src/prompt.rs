//! Prompt construction for the four summarization shapes.
//!
//! Each shape pairs a fixed system instruction with a rendered user
//! message, a response token budget, and a sampling temperature. The
//! 10-item overview cap and 100-character description previews are
//! contractual defaults, overridable through [`PromptConfig`].

use gitlab::{Comment, Issue};
use llm::CompletionRequest;

const SYSTEM_ISSUE: &str = "You are a helpful assistant that summarizes software development \
     issues clearly and concisely, including the latest comments.";
const SYSTEM_COLLECTION: &str = "You are a helpful assistant that analyzes and summarizes \
     software development issues to provide insights.";
const SYSTEM_QUERY: &str =
    "You are a helpful assistant that analyzes GitLab issues and answers user questions.";
const SYSTEM_COMMENT: &str = "You are a helpful assistant that summarizes software development \
     comments clearly and concisely.";

/// Budgets and caps for prompt rendering.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Maximum issues embedded in a collection or query overview.
    pub overview_limit: usize,
    /// Description preview cap in characters (ellipsis appended beyond it).
    pub description_preview_chars: usize,
    /// Response budget for an individual issue summary.
    pub issue_max_tokens: u32,
    /// Response budget for a collection summary.
    pub collection_max_tokens: u32,
    /// Response budget for a query-directed summary.
    pub query_max_tokens: u32,
    /// Response budget for a single comment summary.
    pub comment_max_tokens: u32,
    /// Sampling temperature for every shape.
    pub temperature: f32,
    /// Character budget for the rendered thread in individual-issue
    /// prompts; the most recent comments are kept. `None` embeds the
    /// whole thread unbounded.
    pub thread_budget_chars: Option<usize>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            overview_limit: 10,
            description_preview_chars: 100,
            issue_max_tokens: 200,
            collection_max_tokens: 200,
            query_max_tokens: 300,
            comment_max_tokens: 80,
            temperature: 0.3,
            thread_budget_chars: Some(16_000),
        }
    }
}

/// A built prompt, ready to pair with a model into a completion request.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Prompt {
    /// Pair with a model identifier.
    pub fn into_request(self, model: impl Into<String>) -> CompletionRequest {
        CompletionRequest {
            model: model.into(),
            system: self.system,
            user: self.user,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Individual issue summary: full description and discussion thread.
pub fn issue_prompt(issue: &Issue, config: &PromptConfig) -> Prompt {
    let thread = render_thread(issue.comments.comments(), config.thread_budget_chars);
    let description = issue
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description provided");
    let content = format!(
        "Issue #{}: {}\n\
         State: {}\n\
         Author: {} (@{})\n\
         Created: {}\n\
         Description:\n{}\n\
         Comments:\n{}",
        issue.iid,
        issue.title,
        issue.state,
        issue.author.name,
        issue.author.username,
        issue.created_at.to_rfc3339(),
        description,
        if thread.is_empty() { "No comments" } else { &thread },
    );
    let user = format!(
        "Please provide a concise summary (2-3 sentences) of this GitLab issue, \
         including the latest updates and discussions from the comments:\n\n\
         {content}\n\n\
         Focus on:\n\
         - What the issue is about\n\
         - Current status/state\n\
         - Key actionable points or recent discussions from the comments"
    );
    Prompt {
        system: SYSTEM_ISSUE.to_string(),
        user,
        max_tokens: config.issue_max_tokens,
        temperature: config.temperature,
    }
}

/// Collection summary: total count plus a capped overview.
pub fn collection_prompt(issues: &[Issue], config: &PromptConfig) -> Prompt {
    let overview = collection_overview(issues, config);
    let user = format!(
        "Please provide a high-level summary of this collection of GitLab issues:\n\n\
         {overview}\n\
         Include:\n\
         - Overall themes or patterns\n\
         - Distribution of issue states (open/closed)\n\
         - Key areas of focus or concern\n\
         - Any notable trends\n\n\
         Keep it concise (3-4 sentences)."
    );
    Prompt {
        system: SYSTEM_COLLECTION.to_string(),
        user,
        max_tokens: config.collection_max_tokens,
        temperature: config.temperature,
    }
}

/// Query-directed summary: the literal user query plus a one-line-per-issue
/// overview, capped like the collection shape.
pub fn query_prompt(query: &str, issues: &[Issue], config: &PromptConfig) -> Prompt {
    let mut overview = format!("User Query: {query}\n\nIssues Summary:\n");
    for issue in issues.iter().take(config.overview_limit) {
        overview.push_str(&format!(
            "- Issue #{}: {} ({})\n",
            issue.iid, issue.title, issue.state
        ));
    }
    let user = format!(
        "Based on the user's query: \"{query}\"\n\
         Please analyze these GitLab issues and provide a relevant response:\n\n\
         {overview}\n\
         Focus on answering the user's specific question while providing insights \
         from the issues."
    );
    Prompt {
        system: SYSTEM_QUERY.to_string(),
        user,
        max_tokens: config.query_max_tokens,
        temperature: config.temperature,
    }
}

/// Single comment summary.
pub fn comment_prompt(comment: &Comment, config: &PromptConfig) -> Prompt {
    let content = format!(
        "Comment by {} at {}:\n{}",
        comment.author,
        comment.created_at.to_rfc3339(),
        comment.body
    );
    let user = format!(
        "Please provide a concise summary (1-2 sentences) of this GitLab comment:\n\n\
         {content}\n\n\
         Focus on the main point or update in the comment."
    );
    Prompt {
        system: SYSTEM_COMMENT.to_string(),
        user,
        max_tokens: config.comment_max_tokens,
        temperature: config.temperature,
    }
}

fn collection_overview(issues: &[Issue], config: &PromptConfig) -> String {
    let mut overview = format!("Total issues: {}\n\n", issues.len());
    for issue in issues.iter().take(config.overview_limit) {
        overview.push_str(&format!(
            "- Issue #{}: {} ({})\n",
            issue.iid, issue.title, issue.state
        ));
        if let Some(description) = issue.description.as_deref().filter(|d| !d.is_empty()) {
            overview.push_str(&format!(
                "  Description: {}\n",
                preview(description, config.description_preview_chars)
            ));
        }
        overview.push('\n');
    }
    if issues.len() > config.overview_limit {
        overview.push_str(&format!(
            "... and {} more issues\n",
            issues.len() - config.overview_limit
        ));
    }
    overview
}

/// First `limit` characters with an ellipsis marker when truncated.
/// Counted in characters, not bytes, so multibyte text never splits.
fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(limit).collect();
        format!("{truncated}...")
    }
}

/// Render `author: body` lines for comments with a non-empty body. With
/// a character budget, the most recent comments that fit are kept (the
/// individual-summary instruction emphasizes latest updates) and the
/// number of omitted earlier comments is noted.
fn render_thread(comments: &[Comment], budget: Option<usize>) -> String {
    let lines: Vec<String> = comments
        .iter()
        .filter(|c| !c.body.trim().is_empty())
        .map(|c| format!("{}: {}", c.author, c.body))
        .collect();

    let Some(limit) = budget else {
        return lines.join("\n");
    };

    let mut kept: Vec<&str> = Vec::new();
    let mut used = 0;
    for line in lines.iter().rev() {
        let cost = line.chars().count() + 1;
        if used + cost > limit {
            break;
        }
        used += cost;
        kept.push(line);
    }
    kept.reverse();

    let omitted = lines.len() - kept.len();
    if omitted == 0 {
        return lines.join("\n");
    }
    if kept.is_empty() {
        // Even the newest comment exceeds the budget; keep a truncated tail of it.
        let newest = lines.last().map(String::as_str).unwrap_or_default();
        let truncated: String = newest.chars().take(limit).collect();
        return format!("[{} earlier comment(s) omitted]\n{}", lines.len() - 1, truncated);
    }
    format!("[{omitted} earlier comment(s) omitted]\n{}", kept.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitlab::{IssueState, Thread, UserRef};
    use pretty_assertions::assert_eq;

    fn issue(iid: u64, description: Option<&str>) -> Issue {
        Issue {
            iid,
            id: iid + 1000,
            title: format!("Issue {iid}"),
            state: IssueState::Opened,
            created_at: "2024-03-01T09:30:00Z".parse().unwrap(),
            updated_at: "2024-03-02T10:00:00Z".parse().unwrap(),
            closed_at: None,
            author: UserRef {
                username: "alice".to_string(),
                name: "Alice".to_string(),
            },
            assignee: None,
            description: description.map(String::from),
            web_url: format!("https://gitlab.com/g/p/-/issues/{iid}"),
            comments: Thread::NotFetched,
        }
    }

    fn comment(id: u64, author: &str, body: &str) -> Comment {
        Comment {
            id,
            author: author.to_string(),
            body: body.to_string(),
            created_at: "2024-03-01T12:00:00Z".parse().unwrap(),
            llm_summary: None,
        }
    }

    #[test]
    fn overview_caps_at_limit_and_counts_remainder() {
        let issues: Vec<Issue> = (1..=13).map(|iid| issue(iid, Some("desc"))).collect();
        let prompt = collection_prompt(&issues, &PromptConfig::default());
        assert!(prompt.user.contains("Total issues: 13"));
        assert!(prompt.user.contains("- Issue #10:"));
        assert!(!prompt.user.contains("- Issue #11:"));
        assert!(prompt.user.contains("... and 3 more issues"));
        assert_eq!(prompt.max_tokens, 200);
    }

    #[test]
    fn description_preview_caps_at_100_chars_with_ellipsis() {
        let long = "x".repeat(150);
        let issues = vec![issue(1, Some(&long))];
        let prompt = collection_prompt(&issues, &PromptConfig::default());
        let expected = format!("Description: {}...", "x".repeat(100));
        assert!(prompt.user.contains(&expected));
        assert!(!prompt.user.contains(&"x".repeat(101)));
    }

    #[test]
    fn short_description_is_not_truncated() {
        assert_eq!(preview("short", 100), "short");
        // Counted in characters, not bytes.
        let accented = "é".repeat(100);
        assert_eq!(preview(&accented, 100), accented);
    }

    #[test]
    fn issue_prompt_renders_placeholders() {
        let prompt = issue_prompt(&issue(7, None), &PromptConfig::default());
        assert!(prompt.user.contains("Issue #7: Issue 7"));
        assert!(prompt.user.contains("No description provided"));
        assert!(prompt.user.contains("No comments"));
        assert!(prompt.user.contains("Author: Alice (@alice)"));
        assert_eq!(prompt.max_tokens, 200);
    }

    #[test]
    fn issue_prompt_embeds_thread_lines() {
        let mut it = issue(7, Some("something broke"));
        it.comments = Thread::Loaded {
            comments: vec![
                comment(1, "bob", "can reproduce"),
                comment(2, "carol", "fix incoming"),
            ],
        };
        let prompt = issue_prompt(&it, &PromptConfig::default());
        assert!(prompt.user.contains("bob: can reproduce"));
        assert!(prompt.user.contains("carol: fix incoming"));
    }

    #[test]
    fn thread_budget_keeps_most_recent_comments() {
        let comments: Vec<Comment> = (1..=5)
            .map(|i| comment(i, "bob", &format!("comment number {i}")))
            .collect();
        // Room for roughly two lines.
        let rendered = render_thread(&comments, Some(45));
        assert!(rendered.starts_with("[3 earlier comment(s) omitted]"));
        assert!(rendered.contains("comment number 4"));
        assert!(rendered.contains("comment number 5"));
        assert!(!rendered.contains("comment number 3"));
    }

    #[test]
    fn unbounded_thread_renders_everything() {
        let comments: Vec<Comment> = (1..=5)
            .map(|i| comment(i, "bob", &format!("comment number {i}")))
            .collect();
        let rendered = render_thread(&comments, None);
        assert!(rendered.contains("comment number 1"));
        assert!(rendered.contains("comment number 5"));
        assert!(!rendered.contains("omitted"));
    }

    #[test]
    fn empty_bodies_are_skipped() {
        let comments = vec![comment(1, "bob", "   "), comment(2, "carol", "real")];
        assert_eq!(render_thread(&comments, None), "carol: real");
    }

    #[test]
    fn query_prompt_embeds_query_and_capped_overview() {
        let issues: Vec<Issue> = (1..=12).map(|iid| issue(iid, Some("desc"))).collect();
        let prompt = query_prompt("what is blocked?", &issues, &PromptConfig::default());
        assert!(prompt.user.contains("User Query: what is blocked?"));
        assert!(prompt.user.contains("Based on the user's query: \"what is blocked?\""));
        assert!(prompt.user.contains("- Issue #10:"));
        assert!(!prompt.user.contains("- Issue #11:"));
        // Query overviews are one line per issue, no description previews.
        assert!(!prompt.user.contains("Description:"));
        assert_eq!(prompt.max_tokens, 300);
    }

    #[test]
    fn comment_prompt_embeds_author_timestamp_body() {
        let prompt = comment_prompt(&comment(1, "bob", "deployed the fix"), &PromptConfig::default());
        assert!(prompt.user.contains("Comment by bob at 2024-03-01T12:00:00+00:00:"));
        assert!(prompt.user.contains("deployed the fix"));
        assert_eq!(prompt.max_tokens, 80);
    }
}
