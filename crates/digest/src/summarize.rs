//! Summarization over a resolved provider. Provider failures are data,
//! not control flow: a [`Summary`] carries either the text or the error
//! so callers can report partial results.

use crate::prompt::{self, Prompt, PromptConfig};
use gitlab::{Comment, Issue};
use llm::{LlmError, ProviderKind, ResolvedProvider};
use tracing::warn;

/// The outcome of one summarization call, annotated with the provider
/// identity and model that actually produced (or failed to produce) it.
#[derive(Debug)]
pub struct Summary {
    pub provider: ProviderKind,
    pub model: String,
    pub result: Result<String, LlmError>,
}

impl Summary {
    /// The summary text, if the call succeeded.
    pub fn text(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }

    /// The failure, if the call did not succeed.
    pub fn error(&self) -> Option<&LlmError> {
        self.result.as_ref().err()
    }
}

/// Builds prompts and runs them against one resolved provider with a
/// fixed model choice.
pub struct Summarizer<'a> {
    resolved: &'a ResolvedProvider,
    model: String,
    config: PromptConfig,
}

impl<'a> Summarizer<'a> {
    /// Use the provider's default model unless `model` overrides it.
    pub fn new(resolved: &'a ResolvedProvider, model: Option<String>, config: PromptConfig) -> Self {
        let model = model.unwrap_or_else(|| resolved.default_model());
        Self {
            resolved,
            model,
            config,
        }
    }

    /// The model every call through this summarizer uses.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Provider identity behind this summarizer.
    pub fn provider_kind(&self) -> ProviderKind {
        self.resolved.kind
    }

    /// Summarize one issue with its full thread.
    pub async fn summarize_issue(&self, issue: &Issue) -> Summary {
        self.run(prompt::issue_prompt(issue, &self.config)).await
    }

    /// Summarize a collection of issues at overview level.
    pub async fn summarize_collection(&self, issues: &[Issue]) -> Summary {
        self.run(prompt::collection_prompt(issues, &self.config)).await
    }

    /// Answer a free-text question against the issue collection.
    pub async fn answer_query(&self, query: &str, issues: &[Issue]) -> Summary {
        self.run(prompt::query_prompt(query, issues, &self.config)).await
    }

    /// Summarize a single comment.
    pub async fn summarize_comment(&self, comment: &Comment) -> Summary {
        self.run(prompt::comment_prompt(comment, &self.config)).await
    }

    async fn run(&self, prompt: Prompt) -> Summary {
        let request = prompt.into_request(self.model.clone());
        let result = self.resolved.provider.complete(request).await;
        if let Err(e) = &result {
            warn!(provider = %self.resolved.kind, model = %self.model, error = %e, "summarization call failed");
        }
        Summary {
            provider: self.resolved.kind,
            model: self.model.clone(),
            result,
        }
    }
}
