//! Conversions between AWS Bedrock SDK types and gateway types

use aws_sdk_bedrockruntime::error::SdkError;
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use aws_sdk_bedrockruntime::types as bedrock;
use concierge_application::ports::llm_gateway::GatewayError;

/// Concatenate the text blocks of a Converse output.
pub fn output_text(output: &bedrock::ConverseOutput) -> String {
    match output {
        bedrock::ConverseOutput::Message(message) => text_of(message.content()),
        _ => String::new(),
    }
}

fn text_of(blocks: &[bedrock::ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            bedrock::ContentBlock::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Convert a Bedrock SDK error to a GatewayError.
pub fn convert_converse_error(err: &SdkError<ConverseError>) -> GatewayError {
    match err {
        SdkError::ServiceError(service_err) => match service_err.err() {
            ConverseError::ThrottlingException(e) => {
                GatewayError::RateLimited(format!("Bedrock throttled: {}", e))
            }
            ConverseError::ModelNotReadyException(e) => {
                GatewayError::ModelNotAvailable(format!("Bedrock model not ready: {}", e))
            }
            ConverseError::ResourceNotFoundException(e) => {
                GatewayError::ModelNotAvailable(format!("Bedrock model not found: {}", e))
            }
            ConverseError::ValidationException(e) => {
                GatewayError::RequestFailed(format!("Bedrock validation error: {}", e))
            }
            ConverseError::ModelTimeoutException(_) => GatewayError::Timeout,
            other => GatewayError::RequestFailed(format!("Bedrock error: {:?}", other)),
        },
        SdkError::TimeoutError(_) => GatewayError::Timeout,
        other => GatewayError::ConnectionError(format!("Bedrock SDK error: {}", other)),
    }
}
