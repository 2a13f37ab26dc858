//! The expert generator.
//!
//! One generator serves every expert: the [`ExpertProfile`] supplies the
//! instructions, knowledge and model, and [`ExpertGenerator::respond`] does
//! the rest. Exactly one completion call is made per invocation and the
//! answer must satisfy the [`ResponseSchema`]; nothing is retried or
//! fabricated.

use crate::config::TurnParams;
use crate::ports::diagnostic_sink::{DiagnosticRecord, DiagnosticSink, NoDiagnosticSink};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::use_cases::expert_registry::ExpertProfile;
use crate::use_cases::shared::complete_once;
use concierge_domain::util::truncate_str;
use concierge_domain::{
    ContractViolation, ConversationHistory, PromptVars, ResponseSchema, StructuredResponse,
    UserInput,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A turn-level failure while generating an answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("completion failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("answer violates the response contract: {0}")]
    Contract(#[from] ContractViolation),
}

/// The assembled request for one expert call.
#[derive(Debug, Clone)]
pub struct ExpertRequest {
    pub system_prompt: String,
    pub message: String,
}

pub struct ExpertGenerator {
    gateway: Arc<dyn LlmGateway>,
    schema: ResponseSchema,
    params: TurnParams,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl ExpertGenerator {
    pub fn new(gateway: Arc<dyn LlmGateway>, schema: ResponseSchema, params: TurnParams) -> Self {
        Self {
            gateway,
            schema,
            params,
            diagnostics: Arc::new(NoDiagnosticSink),
        }
    }

    /// Create with a diagnostic sink.
    pub fn with_diagnostic_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn schema(&self) -> &ResponseSchema {
        &self.schema
    }

    /// Render the expert's instructions for this turn.
    pub fn assemble(
        &self,
        profile: &ExpertProfile,
        history: &ConversationHistory,
        input: &UserInput,
    ) -> ExpertRequest {
        let rendered_history = history.render(self.params.history_window);
        let format_instructions = self.schema.format_instructions();
        let vars = PromptVars {
            history: &rendered_history,
            user_input: input.as_str(),
            format_instructions: &format_instructions,
            context: profile.knowledge.as_deref(),
        };
        ExpertRequest {
            system_prompt: profile.system_prompt.render(&vars),
            message: profile.template.render(&vars),
        }
    }

    pub async fn respond(
        &self,
        profile: &ExpertProfile,
        history: &ConversationHistory,
        input: &UserInput,
    ) -> Result<StructuredResponse, GenerationError> {
        let request = self.assemble(profile, history, input);
        let started = Instant::now();

        let raw = complete_once(
            self.gateway.as_ref(),
            &profile.model,
            &request.system_prompt,
            &request.message,
            self.params.timeout,
        )
        .await
        .inspect_err(|e| warn!(expert = %profile.kind, error = %e, "Expert call failed"))?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        debug!(expert = %profile.kind, elapsed_ms, raw = truncate_str(&raw, 300), "Expert answer");

        let response = self.schema.validate(&raw).inspect_err(|e| {
            warn!(expert = %profile.kind, violation = %e, "Expert answer rejected");
        })?;

        info!(
            expert = %profile.kind,
            model = %profile.model,
            elapsed_ms,
            key_words = response.key_words.len(),
            "Expert answered"
        );

        if profile.log_diagnostics {
            self.diagnostics.record(DiagnosticRecord::new(
                "expert_prompt",
                json!({
                    "expert": profile.kind.as_str(),
                    "model": profile.model.as_str(),
                    "knowledge": profile.knowledge_id,
                    "system_prompt": request.system_prompt,
                    "message": request.message,
                    "user_input": input.as_str(),
                    "elapsed_ms": elapsed_ms,
                }),
            ));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpertSpec;
    use crate::use_cases::expert_registry::ExpertRegistry;
    use crate::use_cases::shared::testing::*;
    use concierge_domain::ExpertKind;

    const CAPACITY: &str = "E-208 : batterie 51 kWh, autonomie WLTP 410 km";

    async fn profile(kind: ExpertKind) -> Arc<ExpertProfile> {
        let loader = Arc::new(MapLoader::with(&[
            ("peugeot_data.txt", "La gamme E- de Peugeot"),
            ("peugeot_capacity_data.txt", CAPACITY),
        ]));
        ExpertRegistry::new(loader, [ExpertSpec::default_for(kind)])
            .profile(kind)
            .await
            .unwrap()
    }

    fn input(s: &str) -> UserInput {
        UserInput::try_new(s).unwrap()
    }

    fn generator(gateway: Arc<MockGateway>) -> ExpertGenerator {
        ExpertGenerator::new(gateway, ResponseSchema::default(), TurnParams::default())
    }

    #[tokio::test]
    async fn test_valid_answer_round_trips() {
        let gateway = Arc::new(MockGateway::new(vec![text(VALID_ANSWER)]));
        let g = generator(gateway.clone());
        let p = profile(ExpertKind::General).await;

        let out = g
            .respond(&p, &ConversationHistory::new(), &input("bonjour"))
            .await
            .unwrap();
        assert_eq!(out.response, "Bonjour ! Je suis EV Genius.");
        assert_eq!(
            out.key_words,
            vec!["E-208 autonomie", "Essai gratuit", "Recharge maison"]
        );
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_data_lookup_prompt_embeds_knowledge() {
        let gateway = Arc::new(MockGateway::new(vec![text(VALID_ANSWER)]));
        let g = generator(gateway.clone());
        let p = profile(ExpertKind::DataLookup).await;

        g.respond(&p, &ConversationHistory::new(), &input("autonomie E-208 ?"))
            .await
            .unwrap();
        let call = &gateway.calls()[0];
        assert!(call.system_prompt.contains(CAPACITY));
        assert!(!call.system_prompt.contains("{context}"));
        assert!(call.content.contains("autonomie E-208 ?"));
        assert!(call.content.contains("key_words"));
    }

    #[tokio::test]
    async fn test_malformed_answer_is_a_failure() {
        let gateway = Arc::new(MockGateway::new(vec![text("Bien sûr ! La E-208...")]));
        let g = generator(gateway);
        let p = profile(ExpertKind::Domain).await;

        let err = g
            .respond(&p, &ConversationHistory::new(), &input("E-208 ?"))
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::Contract(ContractViolation::NotJson));
    }

    #[tokio::test]
    async fn test_too_many_key_words_is_a_failure() {
        let raw = r#"{"response": "ok", "key_words": ["a", "b", "c", "d", "e"]}"#;
        let gateway = Arc::new(MockGateway::new(vec![text(raw)]));
        let g = generator(gateway);
        let p = profile(ExpertKind::General).await;

        let err = g
            .respond(&p, &ConversationHistory::new(), &input("salut"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Contract(ContractViolation::KeyWordCount { found: 5, .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_masked() {
        let gateway = Arc::new(MockGateway::new(vec![Reply::Fail(GatewayError::RateLimited(
            "429".to_string(),
        ))]));
        let g = generator(gateway.clone());
        let p = profile(ExpertKind::General).await;

        let err = g
            .respond(&p, &ConversationHistory::new(), &input("salut"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Gateway(GatewayError::RateLimited(_))));
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_diagnostics_follow_expert_setting() {
        for (kind, expected) in [
            (ExpertKind::General, 1),
            (ExpertKind::Domain, 1),
            (ExpertKind::DataLookup, 0),
        ] {
            let sink = Arc::new(RecordingSink::default());
            let gateway = Arc::new(MockGateway::new(vec![text(VALID_ANSWER)]));
            let g = generator(gateway).with_diagnostic_sink(sink.clone());
            let p = profile(kind).await;

            g.respond(&p, &ConversationHistory::new(), &input("question"))
                .await
                .unwrap();
            let records = sink.records.lock().unwrap();
            assert_eq!(records.len(), expected, "expert = {kind}");
            if let Some((record_type, payload)) = records.first() {
                assert_eq!(record_type, "expert_prompt");
                assert_eq!(payload["user_input"], "question");
            }
        }
    }

    #[tokio::test]
    async fn test_failed_call_records_nothing() {
        let sink = Arc::new(RecordingSink::default());
        let gateway = Arc::new(MockGateway::new(vec![text("nope")]));
        let g = generator(gateway).with_diagnostic_sink(sink.clone());
        let p = profile(ExpertKind::General).await;

        assert!(g
            .respond(&p, &ConversationHistory::new(), &input("question"))
            .await
            .is_err());
        assert!(sink.records.lock().unwrap().is_empty());
    }
}
