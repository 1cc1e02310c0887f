//! Provider selection and fallback.

use crate::credentials::Credentials;
use crate::error::{LlmError, Result};
use crate::provider::groq::GroqProvider;
use crate::provider::openai::OpenAiProvider;
use crate::provider::{LlmProvider, ProviderKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// A provider client together with the identity that was actually
/// resolved. Callers must inspect `kind`: a request for an unavailable
/// provider falls back silently to the cached one.
#[derive(Clone)]
pub struct ResolvedProvider {
    pub kind: ProviderKind,
    pub provider: Arc<dyn LlmProvider>,
}

impl std::fmt::Debug for ResolvedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedProvider")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl ResolvedProvider {
    /// The resolved provider's default model.
    pub fn default_model(&self) -> String {
        self.provider.default_model().to_string()
    }
}

/// Maps provider names to lazily-constructed clients.
///
/// An owned per-context value: resolution mutates only this registry,
/// so concurrent callers each hold their own and cannot race on a
/// shared client switch.
pub struct ProviderRegistry {
    credentials: Credentials,
    base_urls: HashMap<ProviderKind, String>,
    active: Option<ResolvedProvider>,
}

impl ProviderRegistry {
    /// Create a registry over explicit credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_urls: HashMap::new(),
            active: None,
        }
    }

    /// Create a registry from the environment.
    pub fn from_env() -> Self {
        Self::new(Credentials::from_env())
    }

    /// Override one provider's base URL (used by tests and self-hosted
    /// gateways).
    pub fn with_base_url(mut self, kind: ProviderKind, url: impl Into<String>) -> Self {
        self.base_urls.insert(kind, url.into());
        self
    }

    /// Provider kinds with a credential present.
    pub fn available(&self) -> Vec<ProviderKind> {
        [ProviderKind::Groq, ProviderKind::OpenAi]
            .into_iter()
            .filter(|kind| self.credentials.for_kind(*kind).is_some())
            .collect()
    }

    /// Resolve a live client.
    ///
    /// With nothing cached, prefers Groq, falls back to OpenAI, and
    /// reports [`LlmError::NoProviderAvailable`] if neither credential is
    /// present. A subsequent request for a different provider switches
    /// only when that provider's credential exists; otherwise the cached
    /// client is kept and its identity returned unchanged.
    pub fn resolve(&mut self, requested: Option<ProviderKind>) -> Result<ResolvedProvider> {
        if self.active.is_none() {
            let default_kind = [ProviderKind::Groq, ProviderKind::OpenAi]
                .into_iter()
                .find(|kind| self.credentials.for_kind(*kind).is_some())
                .ok_or(LlmError::NoProviderAvailable)?;
            let resolved = self.build(default_kind)?;
            info!(provider = %resolved.kind, "initialized summarization provider");
            self.active = Some(resolved);
        }

        if let Some(kind) = requested {
            let current = self.active.as_ref().map(|r| r.kind);
            if current != Some(kind) {
                if self.credentials.for_kind(kind).is_some() {
                    let resolved = self.build(kind)?;
                    info!(provider = %kind, "switched summarization provider");
                    self.active = Some(resolved);
                } else {
                    debug!(
                        requested = %kind,
                        "requested provider has no credential; keeping current"
                    );
                }
            }
        }

        // Safe: populated above or an error was returned.
        self.active
            .clone()
            .ok_or(LlmError::NoProviderAvailable)
    }

    fn build(&self, kind: ProviderKind) -> Result<ResolvedProvider> {
        let api_key = self
            .credentials
            .for_kind(kind)
            .ok_or_else(|| LlmError::MissingCredentials(kind.to_string()))?;
        let provider: Arc<dyn LlmProvider> = match kind {
            ProviderKind::Groq => {
                let mut provider = GroqProvider::with_api_key(api_key);
                if let Some(url) = self.base_urls.get(&kind) {
                    provider = provider.base_url(url.clone());
                }
                Arc::new(provider)
            }
            ProviderKind::OpenAi => {
                let mut provider = OpenAiProvider::with_api_key(api_key);
                if let Some(url) = self.base_urls.get(&kind) {
                    provider = provider.base_url(url.clone());
                }
                Arc::new(provider)
            }
        };
        Ok(ResolvedProvider { kind, provider })
    }
}
