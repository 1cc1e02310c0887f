//! Groq provider using the OpenAI-compatible chat completions API.
//!
//! Groq's free tier makes it the preferred default when both providers
//! have credentials. API docs: https://console.groq.com/docs/api-reference

use super::openai_common::complete_chat;
use crate::error::{LlmError, Result};
use crate::provider::{CompletionRequest, LlmProvider, ProviderKind};
use async_trait::async_trait;
use reqwest::Client;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq provider (OpenAI-compatible).
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqProvider {
    /// Create a new Groq provider using `GROQ_API_KEY`.
    pub fn new() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| LlmError::MissingCredentials("GROQ_API_KEY".into()))?;
        Ok(Self::with_api_key(api_key))
    }

    /// Create with a custom API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        }
    }

    /// Override the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    fn display_name(&self) -> &'static str {
        "Groq"
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
