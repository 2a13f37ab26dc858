//! Anthropic provider adapter
//!
//! Implements `ProviderAdapter` to plug into the `RoutingGateway`.

use super::session::{AnthropicEndpoint, AnthropicSession};
use crate::providers::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use concierge_application::ports::llm_gateway::{GatewayError, LlmSession};
use concierge_domain::{AnthropicProviderConfig, Model};
use std::sync::Arc;
use tracing::{info, warn};

pub struct AnthropicProviderAdapter {
    endpoint: Arc<AnthropicEndpoint>,
}

impl AnthropicProviderAdapter {
    /// Create an adapter, or `None` when no API key can be resolved.
    pub fn try_new(config: &AnthropicProviderConfig) -> Option<Self> {
        let Some(api_key) = config.resolve_api_key() else {
            warn!(
                env = %config.api_key_env,
                "Anthropic provider not available: no API key"
            );
            return None;
        };
        info!(base_url = %config.base_url, "Anthropic provider initialized");
        Some(Self::with_api_key(config, api_key))
    }

    pub fn with_api_key(config: &AnthropicProviderConfig, api_key: String) -> Self {
        let url = format!("{}/v1/messages", config.base_url.trim_end_matches('/'));
        Self {
            endpoint: Arc::new(AnthropicEndpoint {
                client: reqwest::Client::new(),
                url,
                api_key,
                api_version: config.api_version.clone(),
                max_tokens: config.max_tokens,
            }),
        }
    }

    pub fn url(&self) -> &str {
        &self.endpoint.url
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProviderAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(AnthropicSession::new(
            self.endpoint.clone(),
            model.clone(),
            system_prompt.to_string(),
        )))
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(vec![
            Model::ClaudeSonnet35,
            Model::ClaudeHaiku35,
            Model::ClaudeSonnet4,
            Model::ClaudeSonnet45,
            Model::ClaudeHaiku45,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url() {
        let config = AnthropicProviderConfig {
            base_url: "https://proxy.example.com/".to_string(),
            ..Default::default()
        };
        let adapter = AnthropicProviderAdapter::with_api_key(&config, "sk-test".to_string());
        assert_eq!(adapter.url(), "https://proxy.example.com/v1/messages");
    }

    #[test]
    fn test_no_key_no_adapter() {
        let config = AnthropicProviderConfig {
            api_key: None,
            api_key_env: "CONCIERGE_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        assert!(AnthropicProviderAdapter::try_new(&config).is_none());
    }

    #[tokio::test]
    async fn test_session_keeps_model() {
        let adapter =
            AnthropicProviderAdapter::with_api_key(&AnthropicProviderConfig::default(), "k".into());
        let session = adapter
            .create_session_with_system_prompt(&Model::ClaudeHaiku35, "sys")
            .await
            .unwrap();
        assert_eq!(session.model(), &Model::ClaudeHaiku35);
    }
}
