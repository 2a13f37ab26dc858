//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversion into application types happens here so the rest of the
//! program never sees raw strings.

mod behavior;
mod experts;
mod models;
mod providers;

pub use behavior::{FileBehaviorConfig, FileContractConfig, FileLoggingConfig, FileResourcesConfig};
pub use experts::{FileClassifierConfig, FileExpertConfig, FileExpertsConfig};
pub use models::FileModelsConfig;
pub use providers::{FileAnthropicConfig, FileBedrockConfig, FileProvidersConfig};

use crate::providers::ProviderKind;
use concierge_application::{
    CLASSIFIER_PLACEHOLDERS, ClassifierSpec, EXPERT_PLACEHOLDERS, ExpertSpec, TurnParams,
};
use concierge_domain::{ExpertKind, PromptTemplate, ProviderConfig, ResponseSchema, TemplateError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration value that cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("behavior.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("behavior.history_window cannot be 0")]
    InvalidHistoryWindow,

    #[error("models.{field}: model name cannot be empty")]
    EmptyModelName { field: &'static str },

    #[error("contract: key word bounds must satisfy 1 <= min ({min}) <= max ({max})")]
    KeyWordBounds { min: usize, max: usize },

    #[error("contract.max_key_word_words cannot be 0")]
    InvalidKeyWordLength,

    #[error("{field}: unknown provider '{value}' (expected one of: anthropic, bedrock)")]
    UnknownProvider { field: String, value: String },

    #[error("{field}: `file:` needs a resource identifier")]
    EmptyResource { field: String },

    #[error("{field}: {source}")]
    Template {
        field: String,
        #[source]
        source: TemplateError,
    },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model per component
    pub models: FileModelsConfig,
    /// Deadlines, history window and memoization
    pub behavior: FileBehaviorConfig,
    /// Response contract bounds
    pub contract: FileContractConfig,
    /// Knowledge and prompt resource location
    pub resources: FileResourcesConfig,
    /// Classifier instructions
    pub classifier: FileClassifierConfig,
    /// Expert instructions and knowledge
    pub experts: FileExpertsConfig,
    /// Diagnostic records and log files
    pub logging: FileLoggingConfig,
    /// Provider settings and model routing
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.behavior.timeout_seconds == Some(0) {
            errors.push(ConfigValidationError::InvalidTimeout);
        }
        if self.behavior.history_window == Some(0) {
            errors.push(ConfigValidationError::InvalidHistoryWindow);
        }

        for (field, value) in self.models.fields() {
            if value.is_some_and(|v| v.trim().is_empty()) {
                errors.push(ConfigValidationError::EmptyModelName { field });
            }
        }

        let contract = &self.contract;
        if contract.min_key_words == 0 || contract.min_key_words > contract.max_key_words {
            errors.push(ConfigValidationError::KeyWordBounds {
                min: contract.min_key_words,
                max: contract.max_key_words,
            });
        }
        if contract.max_key_word_words == 0 {
            errors.push(ConfigValidationError::InvalidKeyWordLength);
        }

        let mut check_provider = |field: String, value: &str| {
            if ProviderKind::from_name(value).is_none() {
                errors.push(ConfigValidationError::UnknownProvider {
                    field,
                    value: value.to_string(),
                });
            }
        };
        if let Some(default) = &self.providers.default {
            check_provider("providers.default".to_string(), default);
        }
        let mut routes: Vec<_> = self.providers.routing.iter().collect();
        routes.sort();
        for (model, provider) in routes {
            check_provider(format!("providers.routing.\"{model}\""), provider);
        }

        let mut texts = vec![
            ("classifier.rubric".to_string(), self.classifier.rubric.as_ref()),
            ("classifier.template".to_string(), self.classifier.template.as_ref()),
        ];
        for kind in ExpertKind::ALL {
            let expert = self.experts.get(kind);
            texts.push((format!("experts.{kind}.system_prompt"), expert.system_prompt.as_ref()));
            texts.push((format!("experts.{kind}.template"), expert.template.as_ref()));
        }
        for (field, value) in texts {
            if let Some(value) = value
                && let Some(id) = value.strip_prefix("file:")
                && id.trim().is_empty()
            {
                errors.push(ConfigValidationError::EmptyResource { field });
            }
        }

        // Resource templates are checked when loaded; inline ones can be checked now.
        let mut templates = vec![(
            "classifier.template".to_string(),
            self.classifier.template.as_ref(),
            CLASSIFIER_PLACEHOLDERS,
        )];
        for kind in ExpertKind::ALL {
            templates.push((
                format!("experts.{kind}.template"),
                self.experts.get(kind).template.as_ref(),
                EXPERT_PLACEHOLDERS,
            ));
        }
        for (field, value, required) in templates {
            if let Some(value) = value
                && !value.starts_with("file:")
                && let Err(source) = PromptTemplate::new(value.clone()).require(required)
            {
                errors.push(ConfigValidationError::Template { field, source });
            }
        }

        errors
    }

    // ==================== Conversions ====================

    pub fn turn_params(&self) -> TurnParams {
        self.behavior.to_turn_params()
    }

    pub fn response_schema(&self) -> ResponseSchema {
        self.contract.to_schema()
    }

    pub fn classifier_spec(&self) -> ClassifierSpec {
        self.classifier.to_spec(self.models.classifier_model())
    }

    pub fn expert_specs(&self) -> Vec<ExpertSpec> {
        ExpertKind::ALL
            .into_iter()
            .map(|kind| {
                let model = self.models.expert_model(kind.as_str());
                self.experts.get(kind).to_spec(kind, model)
            })
            .collect()
    }

    pub fn provider_config(&self) -> ProviderConfig {
        self.providers.to_provider_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::{Model, Placeholder};
    use std::time::Duration;

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_full_config_deserialize() {
        let toml_str = r#"
[models]
classifier = "claude-3.5-haiku"

[behavior]
timeout_seconds = 30
history_window = 6
memo_ttl_seconds = 600

[contract]
min_key_words = 2
max_key_words = 5

[resources]
base_dir = "/srv/concierge"

[experts.domain]
knowledge = "models.txt"

[logging]
diagnostics = "logs/prompts.jsonl"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());

        let params = config.turn_params();
        assert_eq!(params.timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.history_window, Some(6));
        assert!(params.memo_enabled());

        let schema = config.response_schema();
        assert_eq!((schema.min_key_words, schema.max_key_words), (2, 5));

        assert_eq!(config.classifier_spec().model, Model::ClaudeHaiku35);

        let specs = config.expert_specs();
        assert_eq!(specs.len(), 3);
        let domain = specs.iter().find(|s| s.kind == ExpertKind::Domain).unwrap();
        assert_eq!(domain.knowledge.as_deref(), Some("models.txt"));
        assert_eq!(domain.model, Model::ClaudeSonnet35);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let toml_str = r#"
[models]
general = "  "

[behavior]
timeout_seconds = 0

[contract]
min_key_words = 5
max_key_words = 3

[providers]
default = "openai"

[experts.general]
system_prompt = "file:"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let errors = config.validate();
        assert!(errors.contains(&ConfigValidationError::InvalidTimeout));
        assert!(errors.contains(&ConfigValidationError::EmptyModelName { field: "general" }));
        assert!(errors.contains(&ConfigValidationError::KeyWordBounds { min: 5, max: 3 }));
        assert!(errors.contains(&ConfigValidationError::UnknownProvider {
            field: "providers.default".to_string(),
            value: "openai".to_string(),
        }));
        assert!(errors.contains(&ConfigValidationError::EmptyResource {
            field: "experts.general.system_prompt".to_string(),
        }));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_inline_template_missing_placeholder() {
        let toml_str = r#"
[classifier]
template = "Classify this."

[experts.domain]
template = "{history} {user_input}"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let errors = config.validate();
        assert!(errors.contains(&ConfigValidationError::Template {
            field: "classifier.template".to_string(),
            source: TemplateError::MissingPlaceholder(Placeholder::History),
        }));
        assert!(errors.contains(&ConfigValidationError::Template {
            field: "experts.domain.template".to_string(),
            source: TemplateError::MissingPlaceholder(Placeholder::FormatInstructions),
        }));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_resource_template_is_not_checked_at_load() {
        let mut config = FileConfig::default();
        config.classifier.template = Some("file:prompts/classifier.txt".to_string());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_routing_target() {
        let mut config = FileConfig::default();
        config
            .providers
            .routing
            .insert("claude-3.5-haiku".to_string(), "openai".to_string());
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("openai"));
    }

    #[test]
    fn test_effective_config_serializes() {
        let rendered = toml::to_string_pretty(&FileConfig::default()).unwrap();
        assert!(rendered.contains("[behavior]"));
        assert!(rendered.contains("timeout_seconds = 60"));
    }
}
