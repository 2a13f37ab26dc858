//! Instruction sources for the classifier and the experts.

use concierge_domain::prompt::defaults;
use concierge_domain::{ExpertKind, Model};

/// Prefix marking a text value as a resource identifier.
const RESOURCE_PREFIX: &str = "file:";

/// Where an instruction text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Inline(String),
    /// Loaded through the knowledge loader on first use.
    Resource(String),
}

impl TextSource {
    /// Interpret a configured value: `file:<identifier>` names a resource,
    /// anything else is literal text.
    pub fn parse(value: &str) -> Self {
        match value.strip_prefix(RESOURCE_PREFIX) {
            Some(id) => TextSource::Resource(id.trim().to_string()),
            None => TextSource::Inline(value.to_string()),
        }
    }
}

/// Classifier configuration.
#[derive(Debug, Clone)]
pub struct ClassifierSpec {
    pub model: Model,
    /// System prompt holding the labelling rubric.
    pub rubric: TextSource,
    /// User message template.
    pub template: TextSource,
}

impl Default for ClassifierSpec {
    fn default() -> Self {
        Self {
            model: Model::default(),
            rubric: TextSource::Inline(defaults::CLASSIFIER_RUBRIC.to_string()),
            template: TextSource::Inline(defaults::CLASSIFIER_TEMPLATE.to_string()),
        }
    }
}

/// One expert: instructions, knowledge and model.
#[derive(Debug, Clone)]
pub struct ExpertSpec {
    pub kind: ExpertKind,
    pub model: Model,
    pub system_prompt: TextSource,
    pub template: TextSource,
    /// Knowledge identifier substituted into `{context}`.
    pub knowledge: Option<String>,
    /// Record the assembled prompt to the diagnostic sink on success.
    pub log_diagnostics: bool,
}

impl ExpertSpec {
    /// Built-in instructions for `kind`.
    ///
    /// The domain and data-lookup experts expect their knowledge under the
    /// identifiers `peugeot_data.txt` and `peugeot_capacity_data.txt`.
    pub fn default_for(kind: ExpertKind) -> Self {
        let knowledge = match kind {
            ExpertKind::General => None,
            ExpertKind::Domain => Some("peugeot_data.txt".to_string()),
            ExpertKind::DataLookup => Some("peugeot_capacity_data.txt".to_string()),
        };
        Self {
            kind,
            model: Model::default(),
            system_prompt: TextSource::Inline(defaults::expert_system_prompt(kind).to_string()),
            template: TextSource::Inline(defaults::expert_template(kind).to_string()),
            knowledge,
            log_diagnostics: !matches!(kind, ExpertKind::DataLookup),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_knowledge(mut self, knowledge: Option<String>) -> Self {
        self.knowledge = knowledge;
        self
    }
}
