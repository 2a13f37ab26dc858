//! Model selection from TOML (`[models]` section)

use concierge_domain::Model;
use serde::{Deserialize, Serialize};

/// Model per component
///
/// # Example
///
/// ```toml
/// [models]
/// classifier = "claude-3.5-haiku"
/// general = "claude-3.5-sonnet"
/// domain = "claude-sonnet-4.5"
/// data_lookup = "claude-sonnet-4.5"
/// ```
///
/// Unset fields use the default model (Claude 3.5 Sonnet).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub classifier: Option<String>,
    pub general: Option<String>,
    pub domain: Option<String>,
    pub data_lookup: Option<String>,
}

impl FileModelsConfig {
    /// Every configured field, by name.
    pub fn fields(&self) -> [(&'static str, Option<&String>); 4] {
        [
            ("classifier", self.classifier.as_ref()),
            ("general", self.general.as_ref()),
            ("domain", self.domain.as_ref()),
            ("data_lookup", self.data_lookup.as_ref()),
        ]
    }

    pub fn classifier_model(&self) -> Model {
        parse_model(self.classifier.as_ref())
    }

    /// Model for the expert with the given `[models]` key.
    pub fn expert_model(&self, key: &str) -> Model {
        let value = self
            .fields()
            .into_iter()
            .find(|(name, _)| *name == key)
            .and_then(|(_, value)| value);
        parse_model(value)
    }
}

/// Parse a model name; unset or blank falls back to the default model.
fn parse_model(value: Option<&String>) -> Model {
    match value.map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(name) => {
            let Ok(model) = name.parse::<Model>();
            model
        }
        None => Model::default(),
    }
}
