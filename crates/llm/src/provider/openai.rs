//! OpenAI provider.

use super::openai_common::complete_chat;
use crate::error::{LlmError, Result};
use crate::provider::{CompletionRequest, LlmProvider, ProviderKind};
use async_trait::async_trait;
use reqwest::Client;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI chat completions provider.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider using `OPENAI_API_KEY`.
    pub fn new() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| LlmError::MissingCredentials("OPENAI_API_KEY".into()))?;
        Ok(Self::with_api_key(api_key))
    }

    /// Create with a custom API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// Override the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn display_name(&self) -> &'static str {
        "OpenAI"
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        complete_chat(&self.client, &self.base_url, &self.api_key, &request).await
    }
}
