//! Turn classification.
//!
//! [`Classifier::classify`] asks the classifier model to label the turn and
//! maps the label to a [`Category`]. It never fails: a transport error, a
//! malformed answer, an out-of-range label, missing instructions or a
//! template lacking a required placeholder all fall back to
//! [`Category::FALLBACK`].

use crate::config::{ClassifierSpec, TurnParams};
use crate::ports::knowledge_loader::{KnowledgeError, KnowledgeLoader};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::use_cases::memo::Memo;
use crate::use_cases::shared::{complete_once, resolve_text};
use concierge_domain::prompt::defaults::classification_format_instructions;
use concierge_domain::{
    Category, ConversationHistory, LabelError, Placeholder, PromptTemplate, PromptVars,
    TemplateError, UserInput, parse_classification, util::truncate_str,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Why a classification attempt fell back.
#[derive(Error, Debug)]
pub enum ClassificationFailure {
    #[error("classifier instructions unavailable: {0}")]
    Instructions(#[from] KnowledgeError),

    #[error("classifier template rejected: {0}")]
    Template(#[from] TemplateError),

    #[error("classifier call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("classifier label rejected: {0}")]
    Label(#[from] LabelError),
}

/// Placeholders the classifier template must contain.
pub const CLASSIFIER_PLACEHOLDERS: &[Placeholder] = &[
    Placeholder::History,
    Placeholder::UserInput,
    Placeholder::FormatInstructions,
];

struct ClassifierPrompts {
    rubric: String,
    template: PromptTemplate,
}

type MemoKey = (u64, String);

pub struct Classifier {
    gateway: Arc<dyn LlmGateway>,
    loader: Arc<dyn KnowledgeLoader>,
    spec: ClassifierSpec,
    params: TurnParams,
    prompts: OnceCell<ClassifierPrompts>,
    memo: Option<Memo<MemoKey, Category>>,
}

impl Classifier {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        loader: Arc<dyn KnowledgeLoader>,
        spec: ClassifierSpec,
        params: TurnParams,
    ) -> Self {
        let memo = Memo::from_params(&params);
        Self {
            gateway,
            loader,
            spec,
            params,
            prompts: OnceCell::new(),
            memo,
        }
    }

    /// Label the turn. Exactly one completion call unless served from the memo.
    pub async fn classify(&self, input: &UserInput, history: &ConversationHistory) -> Category {
        let key = (history.fingerprint(), input.as_str().to_string());
        if let Some(memo) = &self.memo
            && let Some(category) = memo.get(&key)
        {
            debug!(%category, "Classification served from memo");
            return category;
        }

        match self.try_classify(input, history).await {
            Ok(category) => {
                info!(%category, "Classified turn");
                if let Some(memo) = &self.memo {
                    memo.insert(key, category);
                }
                category
            }
            Err(e) => {
                warn!(
                    error = %e,
                    input = truncate_str(input.as_str(), 80),
                    "Classification failed, falling back to {}",
                    Category::FALLBACK
                );
                Category::FALLBACK
            }
        }
    }

    /// One attempt, with every failure surfaced.
    pub async fn try_classify(
        &self,
        input: &UserInput,
        history: &ConversationHistory,
    ) -> Result<Category, ClassificationFailure> {
        let prompts = self
            .prompts
            .get_or_try_init(|| async { self.load_prompts() })
            .await?;

        let rendered_history = history.render(self.params.history_window);
        let format_instructions = classification_format_instructions();
        let message = prompts.template.render(&PromptVars {
            history: &rendered_history,
            user_input: input.as_str(),
            format_instructions: &format_instructions,
            context: None,
        });

        let raw = complete_once(
            self.gateway.as_ref(),
            &self.spec.model,
            &prompts.rubric,
            &message,
            self.params.timeout,
        )
        .await?;
        debug!(raw = truncate_str(&raw, 200), "Classifier answer");

        Ok(parse_classification(&raw)?)
    }

    fn load_prompts(&self) -> Result<ClassifierPrompts, ClassificationFailure> {
        let rubric = resolve_text(self.loader.as_ref(), &self.spec.rubric)?;
        let template = PromptTemplate::new(resolve_text(self.loader.as_ref(), &self.spec.template)?);
        template.require(CLASSIFIER_PLACEHOLDERS)?;
        Ok(ClassifierPrompts { rubric, template })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextSource;
    use crate::ports::knowledge_loader::NoKnowledge;
    use crate::use_cases::shared::testing::*;
    use concierge_domain::Model;
    use std::time::Duration;

    fn input(s: &str) -> UserInput {
        UserInput::try_new(s).unwrap()
    }

    fn classifier(gateway: Arc<MockGateway>, params: TurnParams) -> Classifier {
        Classifier::new(
            gateway,
            Arc::new(NoKnowledge),
            ClassifierSpec::default(),
            params,
        )
    }

    #[tokio::test]
    async fn test_each_label_maps_to_its_category() {
        for (raw, expected) in [
            (r#"{"relevant_yes_no": "no"}"#, Category::General),
            (r#"{"relevant_yes_no": "yes"}"#, Category::Specialist),
            (r#"{"relevant_yes_no": "ok"}"#, Category::DataLookup),
            ("needs_data_lookup_response", Category::DataLookup),
        ] {
            let gateway = Arc::new(MockGateway::new(vec![text(raw)]));
            let c = classifier(gateway, TurnParams::default());
            let got = c.classify(&input("hello"), &ConversationHistory::new()).await;
            assert_eq!(got, expected, "raw = {raw}");
        }
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_to_general() {
        let gateway = Arc::new(MockGateway::new(vec![Reply::Fail(
            GatewayError::ConnectionError("unreachable".to_string()),
        )]));
        let c = classifier(gateway.clone(), TurnParams::default());
        let got = c
            .classify(&input("quelle est l'autonomie de la E-208 ?"), &ConversationHistory::new())
            .await;
        assert_eq!(got, Category::General);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_and_malformed_labels_fall_back() {
        for raw in [r#"{"relevant_yes_no": "maybe"}"#, "{not json", ""] {
            let gateway = Arc::new(MockGateway::new(vec![text(raw)]));
            let c = classifier(gateway, TurnParams::default());
            let got = c.classify(&input("hi"), &ConversationHistory::new()).await;
            assert_eq!(got, Category::General);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let gateway = Arc::new(MockGateway::new(vec![Reply::Slow(
            Duration::from_secs(120),
            r#"{"relevant_yes_no": "yes"}"#.to_string(),
        )]));
        let c = classifier(gateway, TurnParams::default().with_timeout_seconds(1));
        let err = c
            .try_classify(&input("hi"), &ConversationHistory::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassificationFailure::Gateway(GatewayError::Timeout)));
    }

    #[tokio::test]
    async fn test_missing_rubric_falls_back_without_calling() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let spec = ClassifierSpec {
            rubric: TextSource::Resource("rubric.txt".to_string()),
            ..ClassifierSpec::default()
        };
        let c = Classifier::new(
            gateway.clone(),
            Arc::new(NoKnowledge),
            spec,
            TurnParams::default(),
        );
        let got = c.classify(&input("hi"), &ConversationHistory::new()).await;
        assert_eq!(got, Category::General);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_template_without_user_input_falls_back_without_calling() {
        let gateway = Arc::new(MockGateway::new(vec![text("yes")]));
        let spec = ClassifierSpec {
            template: TextSource::Inline("Classify this. {history} {format_instructions}".to_string()),
            ..ClassifierSpec::default()
        };
        let c = Classifier::new(
            gateway.clone(),
            Arc::new(NoKnowledge),
            spec,
            TurnParams::default(),
        );
        let question = input("quelle autonomie E-208");

        let err = c
            .try_classify(&question, &ConversationHistory::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClassificationFailure::Template(TemplateError::MissingPlaceholder(Placeholder::UserInput))
        ));

        let got = c.classify(&question, &ConversationHistory::new()).await;
        assert_eq!(got, Category::General);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_classifier_uses_configured_model() {
        let gateway = Arc::new(MockGateway::new(vec![text("no")]));
        let spec = ClassifierSpec {
            model: Model::ClaudeHaiku35,
            ..ClassifierSpec::default()
        };
        let c = Classifier::new(
            gateway.clone(),
            Arc::new(NoKnowledge),
            spec,
            TurnParams::default(),
        );
        c.classify(&input("bonjour"), &ConversationHistory::new()).await;
        assert_eq!(gateway.calls()[0].model, Model::ClaudeHaiku35);
    }

    #[tokio::test]
    async fn test_prompt_carries_input_history_and_rubric() {
        let gateway = Arc::new(MockGateway::new(vec![text("yes")]));
        let c = classifier(gateway.clone(), TurnParams::default());
        let mut history = ConversationHistory::new();
        history.commit_exchange(&input("bonjour"), "Bonjour !");

        c.classify(&input("parlez-moi de la E-3008"), &history).await;

        let call = &gateway.calls()[0];
        assert!(call.content.contains("parlez-moi de la E-3008"));
        assert!(call.content.contains("user: bonjour"));
        assert!(call.content.contains("relevant_yes_no"));
        assert!(call.system_prompt.contains("E-208"));
    }

    #[tokio::test]
    async fn test_memo_serves_identical_request() {
        let gateway = Arc::new(MockGateway::new(vec![text("ok")]));
        let params = TurnParams::default().with_memo(Duration::from_secs(60), 16);
        let c = classifier(gateway.clone(), params);
        let history = ConversationHistory::new();

        assert_eq!(c.classify(&input("E-208 ?"), &history).await, Category::DataLookup);
        assert_eq!(c.classify(&input("E-208 ?"), &history).await, Category::DataLookup);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_is_not_memoized() {
        let gateway = Arc::new(MockGateway::new(vec![
            Reply::Fail(GatewayError::Timeout),
            text("yes"),
        ]));
        let params = TurnParams::default().with_memo(Duration::from_secs(60), 16);
        let c = classifier(gateway.clone(), params);
        let history = ConversationHistory::new();

        assert_eq!(c.classify(&input("E-308"), &history).await, Category::General);
        assert_eq!(c.classify(&input("E-308"), &history).await, Category::Specialist);
        assert_eq!(gateway.call_count(), 2);
    }
}
