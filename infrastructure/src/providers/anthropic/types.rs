//! Wire types for the Anthropic Messages API

use concierge_application::ports::llm_gateway::GatewayError;
use concierge_domain::Model;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "is_blank")]
    pub system: &'a str,
    pub messages: Vec<RequestMessage<'a>>,
}

fn is_blank(s: &&str) -> bool {
    s.is_empty()
}

#[derive(Debug, Serialize)]
pub struct RequestMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    /// Concatenated text blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ResponseBlock::Text { text } => Some(text.as_str()),
                ResponseBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// API model id for a domain model. Custom names pass through.
pub fn api_model_id(model: &Model) -> &str {
    match model {
        Model::ClaudeSonnet35 => "claude-3-5-sonnet-20240620",
        Model::ClaudeHaiku35 => "claude-3-5-haiku-20241022",
        Model::ClaudeSonnet4 => "claude-sonnet-4-20250514",
        Model::ClaudeSonnet45 => "claude-sonnet-4-5-20250929",
        Model::ClaudeHaiku45 => "claude-haiku-4-5-20251001",
        Model::Custom(id) => id,
    }
}

/// Map a non-success HTTP status to a GatewayError.
pub fn map_http_error(status: u16, body_text: &str) -> GatewayError {
    let detail = serde_json::from_str::<serde_json::Value>(body_text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body_text.to_string());

    match status {
        429 | 529 => GatewayError::RateLimited(format!("HTTP {status}: {detail}")),
        404 => GatewayError::ModelNotAvailable(detail),
        408 | 504 => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("HTTP {status} from Anthropic API: {detail}")),
    }
}
