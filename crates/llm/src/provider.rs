//! Provider trait and common types.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod groq;
pub mod openai;
mod openai_common;

/// Logical provider name. Open set; these two ship built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Free-tier-style provider (fast open-model inference).
    Groq,
    /// Paid-tier-style provider.
    OpenAi,
}

impl ProviderKind {
    /// The wire/config string for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("unsupported provider '{other}' (use 'groq' or 'openai')")),
        }
    }
}

/// A single chat-style completion request: one system instruction, one
/// user message, a response token budget, and a sampling temperature.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// An interchangeable LLM backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Which logical provider this is.
    fn kind(&self) -> ProviderKind;

    /// Human-readable name.
    fn display_name(&self) -> &'static str;

    /// Default model when the caller does not override one.
    fn default_model(&self) -> &str;

    /// Whether this provider can be used (credential present).
    fn is_available(&self) -> bool;

    /// Complete a chat-style prompt, returning the trimmed text of the
    /// first choice.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
