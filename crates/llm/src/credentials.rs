//! Provider credential resolution.

use crate::provider::ProviderKind;

/// API keys for the built-in providers. Absence of both disables
/// summarization entirely; fetch-only callers are unaffected.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub groq_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    /// Load credentials from the environment, reading a `.env` file
    /// first if one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            groq_api_key: non_empty_var("GROQ_API_KEY"),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
        }
    }

    /// The key for one provider, if set.
    pub fn for_kind(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::Groq => self.groq_api_key.as_deref(),
            ProviderKind::OpenAi => self.openai_api_key.as_deref(),
        }
    }

    /// Whether any provider credential is present.
    pub fn any_present(&self) -> bool {
        self.groq_api_key.is_some() || self.openai_api_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_kind_selects_matching_key() {
        let creds = Credentials {
            groq_api_key: Some("gk".to_string()),
            openai_api_key: None,
        };
        assert_eq!(creds.for_kind(ProviderKind::Groq), Some("gk"));
        assert_eq!(creds.for_kind(ProviderKind::OpenAi), None);
        assert!(creds.any_present());
        assert!(!Credentials::default().any_present());
    }
}
