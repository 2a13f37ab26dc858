//! Classifier and expert instruction sections
//!
//! Text values are literal instructions unless prefixed with `file:`, in
//! which case they name a resource read through the knowledge loader.
//!
//! ```toml
//! [classifier]
//! rubric = "file:prompts/classifier.txt"
//!
//! [experts.domain]
//! knowledge = "catalogue/models.txt"
//! log_diagnostics = true
//! ```

use concierge_application::{ClassifierSpec, ExpertSpec, TextSource};
use concierge_domain::{ExpertKind, Model};
use serde::{Deserialize, Serialize};

/// `[classifier]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClassifierConfig {
    pub rubric: Option<String>,
    pub template: Option<String>,
}

impl FileClassifierConfig {
    pub fn to_spec(&self, model: Model) -> ClassifierSpec {
        let mut spec = ClassifierSpec {
            model,
            ..Default::default()
        };
        if let Some(rubric) = &self.rubric {
            spec.rubric = TextSource::parse(rubric);
        }
        if let Some(template) = &self.template {
            spec.template = TextSource::parse(template);
        }
        spec
    }
}

/// `[experts.<name>]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExpertConfig {
    pub system_prompt: Option<String>,
    pub template: Option<String>,
    /// Knowledge identifier. An empty string removes the default knowledge.
    pub knowledge: Option<String>,
    pub log_diagnostics: Option<bool>,
}

impl FileExpertConfig {
    pub fn to_spec(&self, kind: ExpertKind, model: Model) -> ExpertSpec {
        let mut spec = ExpertSpec::default_for(kind).with_model(model);
        if let Some(prompt) = &self.system_prompt {
            spec.system_prompt = TextSource::parse(prompt);
        }
        if let Some(template) = &self.template {
            spec.template = TextSource::parse(template);
        }
        if let Some(knowledge) = &self.knowledge {
            let knowledge = knowledge.trim();
            spec = spec.with_knowledge((!knowledge.is_empty()).then(|| knowledge.to_string()));
        }
        if let Some(log) = self.log_diagnostics {
            spec.log_diagnostics = log;
        }
        spec
    }
}

/// `[experts]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExpertsConfig {
    pub general: FileExpertConfig,
    pub domain: FileExpertConfig,
    pub data_lookup: FileExpertConfig,
}

impl FileExpertsConfig {
    pub fn get(&self, kind: ExpertKind) -> &FileExpertConfig {
        match kind {
            ExpertKind::General => &self.general,
            ExpertKind::Domain => &self.domain,
            ExpertKind::DataLookup => &self.data_lookup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_keeps_defaults() {
        let spec = FileExpertConfig::default().to_spec(ExpertKind::Domain, Model::default());
        let default = ExpertSpec::default_for(ExpertKind::Domain);
        assert_eq!(spec.knowledge, default.knowledge);
        assert_eq!(spec.system_prompt, default.system_prompt);
        assert!(spec.log_diagnostics);
    }

    #[test]
    fn test_overrides_apply() {
        let config = FileExpertConfig {
            system_prompt: Some("file:prompts/lookup.txt".to_string()),
            knowledge: Some("capacity.txt".to_string()),
            log_diagnostics: Some(true),
            ..Default::default()
        };
        let spec = config.to_spec(ExpertKind::DataLookup, Model::ClaudeHaiku35);
        assert_eq!(
            spec.system_prompt,
            TextSource::Resource("prompts/lookup.txt".to_string())
        );
        assert_eq!(spec.knowledge.as_deref(), Some("capacity.txt"));
        assert!(spec.log_diagnostics);
        assert_eq!(spec.model, Model::ClaudeHaiku35);
    }

    #[test]
    fn test_blank_knowledge_removes_it() {
        let config = FileExpertConfig {
            knowledge: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.to_spec(ExpertKind::Domain, Model::default()).knowledge.is_none());
    }

    #[test]
    fn test_classifier_inline_rubric() {
        let config = FileClassifierConfig {
            rubric: Some("Label: yes or no".to_string()),
            ..Default::default()
        };
        let spec = config.to_spec(Model::ClaudeHaiku35);
        assert_eq!(spec.rubric, TextSource::Inline("Label: yes or no".to_string()));
        assert_eq!(spec.template, ClassifierSpec::default().template);
    }
}
