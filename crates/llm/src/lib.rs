//! Interchangeable LLM summarization backends.
//!
//! Each provider exposes an availability predicate, a default model,
//! and a uniform chat-completion call; the [`ProviderRegistry`] picks
//! between them based on which credentials are present, preferring the
//! free tier and falling back silently when a requested provider is
//! unavailable.
//!
//! # Example
//!
//! ```ignore
//! use llm::{CompletionRequest, ProviderRegistry};
//!
//! let mut registry = ProviderRegistry::from_env();
//! let resolved = registry.resolve(None)?;
//! let text = resolved.provider.complete(CompletionRequest {
//!     model: resolved.default_model(),
//!     system: "You are a helpful assistant.".into(),
//!     user: "Summarize this issue...".into(),
//!     max_tokens: 200,
//!     temperature: 0.3,
//! }).await?;
//! ```

mod credentials;
mod error;
mod provider;
mod registry;

pub use credentials::Credentials;
pub use error::{LlmError, Result};
pub use provider::groq::GroqProvider;
pub use provider::openai::OpenAiProvider;
pub use provider::{CompletionRequest, LlmProvider, ProviderKind};
pub use registry::{ProviderRegistry, ResolvedProvider};
