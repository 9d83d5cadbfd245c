//! Capability provider: the one place that decides whether AI generation is on.
//!
//! Availability is fixed at construction. A missing credential or a client that
//! fails to build leaves the provider unavailable for the rest of the run.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clients::anthropic::AnthropicClient;
use crate::clients::openai::OpenAiClient;
use crate::clients::traits::CompletionClient;
use crate::config::Config;
use crate::error::ProviderError;

/// Closed set of supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    None,
}

impl ProviderKind {
    /// Unknown identifiers resolve to `None`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => ProviderKind::OpenAi,
            "anthropic" | "claude" => ProviderKind::Anthropic,
            _ => ProviderKind::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::None => "none",
        }
    }
}

#[derive(Clone)]
pub struct AiProvider {
    kind: ProviderKind,
    client: Option<Arc<dyn CompletionClient>>,
}

impl std::fmt::Debug for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiProvider")
            .field("kind", &self.kind)
            .field("client", &self.client.as_ref().map(|c| c.name().to_string()))
            .finish()
    }
}

impl AiProvider {
    /// Provider with no backend; every component takes its deterministic path
    pub fn disabled() -> Self {
        Self {
            kind: ProviderKind::None,
            client: None,
        }
    }

    /// Wrap an already-built client
    pub fn with_client(kind: ProviderKind, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            kind,
            client: Some(client),
        }
    }

    /// Select the backend named in the configuration, once, for the whole run
    pub fn from_config(config: &Config) -> Self {
        let kind = config.provider.kind();
        let key = match config.api_key() {
            Some(k) if !is_placeholder(k) => k.to_string(),
            _ => {
                if kind != ProviderKind::None {
                    info!(
                        "No API key for provider '{}', using template-based generation",
                        kind.as_str()
                    );
                }
                return Self::disabled();
            }
        };

        let built: Result<Arc<dyn CompletionClient>, ProviderError> = match kind {
            ProviderKind::OpenAi => OpenAiClient::new(
                key,
                config.provider.openai_model.clone(),
                &config.provider.openai_base_url,
                config.provider.timeout_ms,
            )
            .map(|c| Arc::new(c) as Arc<dyn CompletionClient>),
            ProviderKind::Anthropic => AnthropicClient::new(
                key,
                config.provider.anthropic_model.clone(),
                &config.provider.anthropic_base_url,
                config.provider.timeout_ms,
            )
            .map(|c| Arc::new(c) as Arc<dyn CompletionClient>),
            ProviderKind::None => return Self::disabled(),
        };

        match built {
            Ok(client) => {
                info!("Using {} for content generation", kind.as_str());
                Self::with_client(kind, client)
            }
            Err(e) => {
                warn!(
                    "Could not initialize AI client: {}. Falling back to template-based generation",
                    e
                );
                Self::disabled()
            }
        }
    }

    pub fn available(&self) -> bool {
        self.client.is_some()
    }

    pub fn kind(&self) -> ProviderKind {
        if self.available() {
            self.kind
        } else {
            ProviderKind::None
        }
    }

    pub async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        match &self.client {
            Some(client) => client.complete(prompt, max_tokens, temperature).await,
            None => Err(ProviderError::Unavailable),
        }
    }
}

fn is_placeholder(s: &str) -> bool {
    let t = s.trim();
    t.is_empty()
        || t.contains("${")
        || t.eq_ignore_ascii_case("your-api-key-here")
        || t.eq_ignore_ascii_case("changeme")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ScriptedClient;

    #[test]
    fn parse_is_case_insensitive_and_closed() {
        assert_eq!(ProviderKind::parse("OpenAI"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::parse(" anthropic "), ProviderKind::Anthropic);
        assert_eq!(ProviderKind::parse("gemini"), ProviderKind::None);
        assert_eq!(ProviderKind::parse(""), ProviderKind::None);
    }

    #[test]
    fn missing_key_disables_provider() {
        let config = Config::default();
        let provider = AiProvider::from_config(&config);
        assert!(!provider.available());
        assert_eq!(provider.kind(), ProviderKind::None);
    }

    #[test]
    fn placeholder_key_disables_provider() {
        let mut config = Config::default();
        config.runtime.openai_api_key = Some("your-api-key-here".to_string());
        assert!(!AiProvider::from_config(&config).available());
        config.runtime.openai_api_key = Some("${OPENAI_API_KEY}".to_string());
        assert!(!AiProvider::from_config(&config).available());
    }

    #[test]
    fn real_key_enables_selected_backend() {
        let mut config = Config::default();
        config.provider.name = "anthropic".to_string();
        config.runtime.anthropic_api_key = Some("sk-ant-test".to_string());
        let provider = AiProvider::from_config(&config);
        assert!(provider.available());
        assert_eq!(provider.kind(), ProviderKind::Anthropic);
    }

    #[test]
    fn unknown_provider_is_disabled_even_with_keys() {
        let mut config = Config::default();
        config.provider.name = "mystery".to_string();
        config.runtime.openai_api_key = Some("sk-test".to_string());
        assert!(!AiProvider::from_config(&config).available());
    }

    #[tokio::test]
    async fn disabled_provider_reports_unavailable() {
        let provider = AiProvider::disabled();
        assert_eq!(
            provider.complete("hi", 10, 0.7).await,
            Err(ProviderError::Unavailable)
        );
    }

    #[tokio::test]
    async fn complete_delegates_to_client() {
        let client = Arc::new(ScriptedClient::always("done"));
        let provider = AiProvider::with_client(ProviderKind::OpenAi, client.clone());
        assert_eq!(provider.complete("hi", 10, 0.7).await.unwrap(), "done");
        assert_eq!(client.call_count(), 1);
    }
}
