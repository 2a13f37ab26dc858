//! Anthropic session: one Messages API call per `send`.

use super::types::{MessagesRequest, MessagesResponse, RequestMessage, api_model_id, map_http_error};
use async_trait::async_trait;
use concierge_application::ports::llm_gateway::{GatewayError, LlmSession};
use concierge_domain::Model;
use std::sync::Arc;
use tracing::debug;

/// Connection settings shared by every session of one adapter.
pub struct AnthropicEndpoint {
    pub client: reqwest::Client,
    pub url: String,
    pub api_key: String,
    pub api_version: String,
    pub max_tokens: u32,
}

pub struct AnthropicSession {
    endpoint: Arc<AnthropicEndpoint>,
    model: Model,
    system_prompt: String,
}

impl AnthropicSession {
    pub fn new(endpoint: Arc<AnthropicEndpoint>, model: Model, system_prompt: String) -> Self {
        Self {
            endpoint,
            model,
            system_prompt,
        }
    }
}

#[async_trait]
impl LlmSession for AnthropicSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let body = MessagesRequest {
            model: api_model_id(&self.model),
            max_tokens: self.endpoint.max_tokens,
            system: &self.system_prompt,
            messages: vec![RequestMessage {
                role: "user",
                content,
            }],
        };

        debug!(model = body.model, url = %self.endpoint.url, "Sending Anthropic request");

        let response = self
            .endpoint
            .client
            .post(&self.endpoint.url)
            .header("x-api-key", &self.endpoint.api_key)
            .header("anthropic-version", &self.endpoint.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(format!("Request to Anthropic API failed: {}", e))
                }
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| {
            GatewayError::ConnectionError(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            return Err(map_http_error(status.as_u16(), &body_text));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body_text).map_err(|e| {
            GatewayError::RequestFailed(format!("Invalid JSON in Anthropic response: {}", e))
        })?;
        debug!(stop_reason = ?parsed.stop_reason, "Anthropic response received");

        Ok(parsed.text())
    }
}
