//! Bedrock provider adapter
//!
//! Implements `ProviderAdapter` to plug into the `RoutingGateway`.
//! Handles AWS credential initialization and session creation.

use super::model_map;
use super::session::BedrockSession;
use crate::providers::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use concierge_application::ports::llm_gateway::{GatewayError, LlmSession};
use concierge_domain::{BedrockProviderConfig, Model};
use std::sync::Arc;
use tracing::info;

pub struct BedrockProviderAdapter {
    client: Arc<BedrockClient>,
    region: String,
    max_tokens: i32,
    cross_region: bool,
}

impl BedrockProviderAdapter {
    /// Create a new Bedrock provider adapter.
    ///
    /// Resolves AWS credentials from the default chain (optionally a named
    /// profile) and creates a Bedrock Runtime client.
    pub async fn new(config: &BedrockProviderConfig) -> Self {
        let mut aws_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref profile) = config.profile {
            aws_config_loader = aws_config_loader.profile_name(profile);
        }

        let aws_config = aws_config_loader.load().await;
        let client = BedrockClient::new(&aws_config);
        info!(region = %config.region, "Bedrock provider initialized");

        Self {
            client: Arc::new(client),
            region: config.region.clone(),
            max_tokens: i32::try_from(config.max_tokens).unwrap_or(i32::MAX),
            cross_region: config.cross_region.unwrap_or(false),
        }
    }
}

#[async_trait]
impl ProviderAdapter for BedrockProviderAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Bedrock
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let bedrock_model_id =
            model_map::to_bedrock_model_id(model, self.cross_region, &self.region);

        Ok(Box::new(BedrockSession::new(
            self.client.clone(),
            model.clone(),
            bedrock_model_id,
            system_prompt.to_string(),
            self.max_tokens,
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
