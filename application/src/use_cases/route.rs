//! Expert routing.
//!
//! [`ExpertRouter`] owns the category → expert table lookup, the expert
//! registry, the shared generator and the response memo.

use crate::config::TurnParams;
use crate::use_cases::expert_registry::{ConfigurationError, ExpertProfile, ExpertRegistry};
use crate::use_cases::generate::{ExpertGenerator, GenerationError};
use crate::use_cases::memo::Memo;
use concierge_domain::util::content_hash;
use concierge_domain::{
    Category, ConversationHistory, ExpertKind, StructuredResponse, UserInput, select_expert,
};
use std::sync::Arc;
use tracing::debug;

/// (expert, history fingerprint, input hash)
type MemoKey = (ExpertKind, u64, u64);

pub struct ExpertRouter {
    registry: ExpertRegistry,
    generator: ExpertGenerator,
    memo: Option<Memo<MemoKey, StructuredResponse>>,
}

impl ExpertRouter {
    pub fn new(registry: ExpertRegistry, generator: ExpertGenerator, params: &TurnParams) -> Self {
        Self {
            registry,
            generator,
            memo: Memo::from_params(params),
        }
    }

    pub fn select(&self, category: Category) -> ExpertKind {
        select_expert(category)
    }

    pub async fn profile(&self, kind: ExpertKind) -> Result<Arc<ExpertProfile>, ConfigurationError> {
        self.registry.profile(kind).await
    }

    pub fn registry(&self) -> &ExpertRegistry {
        &self.registry
    }

    /// Answer with the selected expert, or from the memo for a repeat of
    /// the same input on the same history.
    pub async fn respond(
        &self,
        profile: &ExpertProfile,
        history: &ConversationHistory,
        input: &UserInput,
    ) -> Result<StructuredResponse, GenerationError> {
        let key = (profile.kind, history.fingerprint(), content_hash(&input.as_str()));
        if let Some(memo) = &self.memo
            && let Some(hit) = memo.get(&key)
        {
            debug!(expert = %profile.kind, "Response served from memo");
            return Ok(hit);
        }

        let response = self.generator.respond(profile, history, input).await?;
        if let Some(memo) = &self.memo {
            memo.insert(key, response.clone());
        }
        Ok(response)
    }
}
