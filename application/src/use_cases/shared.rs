//! Shared utilities for use cases.
//!
//! Contains the single-call completion helper and instruction resolution
//! used by both the classifier and the expert generator.

use crate::config::TextSource;
use crate::ports::knowledge_loader::{KnowledgeError, KnowledgeLoader};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use concierge_domain::Model;
use std::time::Duration;

/// One completion call: open a session with `system_prompt` and send `content`.
///
/// When `timeout` is set it bounds session creation and the send together;
/// expiry is reported as [`GatewayError::Timeout`].
pub(crate) async fn complete_once(
    gateway: &dyn LlmGateway,
    model: &Model,
    system_prompt: &str,
    content: &str,
    timeout: Option<Duration>,
) -> Result<String, GatewayError> {
    let call = async {
        let session = gateway
            .create_session_with_system_prompt(model, system_prompt)
            .await?;
        session.send(content).await
    };

    match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout),
        },
        None => call.await,
    }
}

/// Resolve a configured text, loading it when it names a resource.
pub(crate) fn resolve_text(
    loader: &dyn KnowledgeLoader,
    source: &TextSource,
) -> Result<String, KnowledgeError> {
    match source {
        TextSource::Inline(text) => Ok(text.clone()),
        TextSource::Resource(id) => loader.load(id),
    }
}
