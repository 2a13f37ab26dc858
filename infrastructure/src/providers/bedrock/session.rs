//! Bedrock LLM session implementation
//!
//! Wraps the AWS Bedrock Converse API to implement the `LlmSession` trait.
//! Each `send` is an independent single-message conversation.

use super::types;
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types as bedrock;
use concierge_application::ports::llm_gateway::{GatewayError, LlmSession};
use concierge_domain::Model;
use std::sync::Arc;
use tracing::debug;

pub struct BedrockSession {
    client: Arc<BedrockClient>,
    model: Model,
    bedrock_model_id: String,
    system_prompt: String,
    max_tokens: i32,
}

impl BedrockSession {
    pub fn new(
        client: Arc<BedrockClient>,
        model: Model,
        bedrock_model_id: String,
        system_prompt: String,
        max_tokens: i32,
    ) -> Self {
        Self {
            client,
            model,
            bedrock_model_id,
            system_prompt,
            max_tokens,
        }
    }

    fn system_blocks(&self) -> Vec<bedrock::SystemContentBlock> {
        if self.system_prompt.is_empty() {
            vec![]
        } else {
            vec![bedrock::SystemContentBlock::Text(self.system_prompt.clone())]
        }
    }
}

#[async_trait]
impl LlmSession for BedrockSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, message: &str) -> Result<String, GatewayError> {
        let user_msg = bedrock::Message::builder()
            .role(bedrock::ConversationRole::User)
            .content(bedrock::ContentBlock::Text(message.to_string()))
            .build()
            .map_err(|e| GatewayError::RequestFailed(format!("Failed to build message: {}", e)))?;

        debug!(model = %self.bedrock_model_id, "Calling Bedrock Converse API");

        let response = self
            .client
            .converse()
            .model_id(&self.bedrock_model_id)
            .set_system(Some(self.system_blocks()))
            .messages(user_msg)
            .inference_config(
                bedrock::InferenceConfiguration::builder()
                    .max_tokens(self.max_tokens)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        let output = response.output().ok_or_else(|| {
            GatewayError::RequestFailed("No output in Bedrock response".to_string())
        })?;

        Ok(types::output_text(output))
    }
}
