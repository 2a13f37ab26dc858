//! Expert profiles, loaded on first use.
//!
//! Each expert's instructions and knowledge are resolved the first time the
//! expert is selected and shared read-only afterwards. A failed load is not
//! cached: the expert stays unavailable until its resources can be read, and
//! the other experts are unaffected.

use crate::config::ExpertSpec;
use crate::ports::knowledge_loader::{KnowledgeError, KnowledgeLoader};
use crate::use_cases::shared::resolve_text;
use concierge_domain::{ExpertKind, Model, Placeholder, PromptTemplate, TemplateError};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Placeholders every expert template must contain.
pub const EXPERT_PLACEHOLDERS: &[Placeholder] = &[
    Placeholder::History,
    Placeholder::UserInput,
    Placeholder::FormatInstructions,
];

/// An expert that cannot serve turns until its resources are fixed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("expert `{0}` is not configured")]
    NotConfigured(ExpertKind),

    #[error("{what} unavailable: {source}")]
    Resource {
        what: &'static str,
        #[source]
        source: KnowledgeError,
    },

    #[error("invalid {what}: {source}")]
    Template {
        what: &'static str,
        #[source]
        source: TemplateError,
    },
}

/// Everything an expert needs to answer, fully resolved.
#[derive(Debug)]
pub struct ExpertProfile {
    pub kind: ExpertKind,
    pub model: Model,
    pub system_prompt: PromptTemplate,
    pub template: PromptTemplate,
    pub knowledge: Option<Arc<str>>,
    pub knowledge_id: Option<String>,
    pub log_diagnostics: bool,
}

pub struct ExpertRegistry {
    loader: Arc<dyn KnowledgeLoader>,
    specs: HashMap<ExpertKind, ExpertSpec>,
    profiles: HashMap<ExpertKind, OnceCell<Arc<ExpertProfile>>>,
}

impl ExpertRegistry {
    pub fn new(loader: Arc<dyn KnowledgeLoader>, specs: impl IntoIterator<Item = ExpertSpec>) -> Self {
        let specs: HashMap<_, _> = specs.into_iter().map(|s| (s.kind, s)).collect();
        let profiles = specs.keys().map(|k| (*k, OnceCell::new())).collect();
        Self {
            loader,
            specs,
            profiles,
        }
    }

    /// Registry with the built-in spec for every expert.
    pub fn with_defaults(loader: Arc<dyn KnowledgeLoader>) -> Self {
        Self::new(loader, ExpertKind::ALL.map(ExpertSpec::default_for))
    }

    pub fn spec(&self, kind: ExpertKind) -> Option<&ExpertSpec> {
        self.specs.get(&kind)
    }

    /// The resolved profile for `kind`, loading it if needed.
    pub async fn profile(&self, kind: ExpertKind) -> Result<Arc<ExpertProfile>, ConfigurationError> {
        let (Some(spec), Some(cell)) = (self.specs.get(&kind), self.profiles.get(&kind)) else {
            return Err(ConfigurationError::NotConfigured(kind));
        };
        cell.get_or_try_init(|| async { self.load(spec).map(Arc::new) })
            .await
            .cloned()
    }

    /// Load every expert, returning the ones that failed.
    pub async fn preload(&self) -> Vec<(ExpertKind, ConfigurationError)> {
        let mut failures = Vec::new();
        for kind in ExpertKind::ALL {
            if let Err(e) = self.profile(kind).await {
                failures.push((kind, e));
            }
        }
        failures
    }

    fn load(&self, spec: &ExpertSpec) -> Result<ExpertProfile, ConfigurationError> {
        let loader = self.loader.as_ref();
        let resource = |what: &'static str| {
            move |source: KnowledgeError| ConfigurationError::Resource { what, source }
        };

        let system_prompt = PromptTemplate::new(
            resolve_text(loader, &spec.system_prompt).map_err(resource("system prompt"))?,
        );
        let template = PromptTemplate::new(
            resolve_text(loader, &spec.template).map_err(resource("template"))?,
        );
        template
            .require(EXPERT_PLACEHOLDERS)
            .map_err(|source| ConfigurationError::Template {
                what: "template",
                source,
            })?;

        let knowledge = match &spec.knowledge {
            Some(id) => {
                if !system_prompt.contains(Placeholder::Context)
                    && !template.contains(Placeholder::Context)
                {
                    return Err(ConfigurationError::Template {
                        what: "system prompt",
                        source: TemplateError::MissingPlaceholder(Placeholder::Context),
                    });
                }
                let text = loader.load(id).map_err(resource("knowledge"))?;
                debug!(expert = %spec.kind, knowledge = %id, bytes = text.len(), "Loaded knowledge");
                Some(Arc::<str>::from(text))
            }
            None => None,
        };

        info!(expert = %spec.kind, model = %spec.model, "Expert ready");
        Ok(ExpertProfile {
            kind: spec.kind,
            model: spec.model.clone(),
            system_prompt,
            template,
            knowledge,
            knowledge_id: spec.knowledge.clone(),
            log_diagnostics: spec.log_diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextSource;
    use crate::use_cases::shared::testing::MapLoader;

    fn registry(loader: Arc<MapLoader>) -> ExpertRegistry {
        ExpertRegistry::with_defaults(loader)
    }

    #[tokio::test]
    async fn test_general_needs_no_knowledge() {
        let reg = registry(Arc::new(MapLoader::default()));
        let profile = reg.profile(ExpertKind::General).await.unwrap();
        assert!(profile.knowledge.is_none());
        assert!(profile.log_diagnostics);
    }

    #[tokio::test]
    async fn test_missing_knowledge_only_affects_that_expert() {
        let loader = Arc::new(MapLoader::with(&[("peugeot_data.txt", "E-208: 400 km")]));
        let reg = registry(loader);

        assert!(reg.profile(ExpertKind::Domain).await.is_ok());
        assert!(reg.profile(ExpertKind::General).await.is_ok());

        let err = reg.profile(ExpertKind::DataLookup).await.unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::Resource {
                what: "knowledge",
                source: KnowledgeError::NotFound("peugeot_capacity_data.txt".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let loader = Arc::new(MapLoader::default());
        let reg = registry(loader.clone());

        assert!(reg.profile(ExpertKind::DataLookup).await.is_err());
        loader.insert("peugeot_capacity_data.txt", "E-208: 51 kWh");
        let profile = reg.profile(ExpertKind::DataLookup).await.unwrap();
        assert_eq!(profile.knowledge.as_deref(), Some("E-208: 51 kWh"));
    }

    #[tokio::test]
    async fn test_successful_load_is_cached() {
        let loader = Arc::new(MapLoader::with(&[("peugeot_data.txt", "data")]));
        let reg = registry(loader.clone());

        reg.profile(ExpertKind::Domain).await.unwrap();
        reg.profile(ExpertKind::Domain).await.unwrap();
        assert_eq!(loader.load_count(), 1);
    }

    #[tokio::test]
    async fn test_template_without_placeholders_is_rejected() {
        let spec = ExpertSpec {
            template: TextSource::Inline("Answer: {user_input}".to_string()),
            ..ExpertSpec::default_for(ExpertKind::General)
        };
        let reg = ExpertRegistry::new(Arc::new(MapLoader::default()), [spec]);
        let err = reg.profile(ExpertKind::General).await.unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::Template {
                source: TemplateError::MissingPlaceholder(Placeholder::History),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_knowledge_without_context_placeholder_is_rejected() {
        let spec = ExpertSpec::default_for(ExpertKind::General)
            .with_knowledge(Some("peugeot_data.txt".to_string()));
        let loader = Arc::new(MapLoader::with(&[("peugeot_data.txt", "data")]));
        let reg = ExpertRegistry::new(loader, [spec]);
        assert!(reg.profile(ExpertKind::General).await.is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_expert() {
        let reg = ExpertRegistry::new(
            Arc::new(MapLoader::default()),
            [ExpertSpec::default_for(ExpertKind::General)],
        );
        assert_eq!(
            reg.profile(ExpertKind::Domain).await.unwrap_err(),
            ConfigurationError::NotConfigured(ExpertKind::Domain)
        );
    }

    #[tokio::test]
    async fn test_file_instructions_are_loaded() {
        let spec = ExpertSpec {
            system_prompt: TextSource::Resource("general_system.txt".to_string()),
            ..ExpertSpec::default_for(ExpertKind::General)
        };
        let loader = Arc::new(MapLoader::with(&[("general_system.txt", "Be warm.")]));
        let reg = ExpertRegistry::new(loader, [spec]);
        let profile = reg.profile(ExpertKind::General).await.unwrap();
        assert_eq!(profile.system_prompt.text(), "Be warm.");
    }
}
