//! Turn classification categories and label parsing.
//!
//! The classifier model answers with a label. Two vocabularies are accepted:
//!
//! | Category | Legacy label | Named labels |
//! |----------|--------------|--------------|
//! | [`Category::General`] | `no` | `general`, `needs_general_response` |
//! | [`Category::Specialist`] | `yes` | `specialist`, `needs_specialist_response` |
//! | [`Category::DataLookup`] | `ok` | `data_lookup`, `needs_data_lookup_response` |

use crate::response::extract::extract_json_object;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON fields the label may be carried in, checked in order.
const LABEL_FIELDS: &[&str] = &["relevant_yes_no", "category", "label"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "needs_general_response")]
    General,
    #[serde(rename = "needs_specialist_response")]
    Specialist,
    #[serde(rename = "needs_data_lookup_response")]
    DataLookup,
}

/// Errors from interpreting a classifier answer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LabelError {
    #[error("classifier returned no label")]
    Empty,

    #[error("classifier JSON has no label field")]
    MissingField,

    #[error("unrecognized classification label: {0}")]
    Unrecognized(String),
}

impl Category {
    pub const ALL: [Category; 3] = [Category::General, Category::Specialist, Category::DataLookup];

    /// Category used whenever classification fails.
    pub const FALLBACK: Category = Category::General;

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "needs_general_response",
            Category::Specialist => "needs_specialist_response",
            Category::DataLookup => "needs_data_lookup_response",
        }
    }

    /// The short label the classifier rubric asks the model for.
    pub fn legacy_label(&self) -> &'static str {
        match self {
            Category::General => "no",
            Category::Specialist => "yes",
            Category::DataLookup => "ok",
        }
    }

    /// Parse a single label, case-insensitively.
    pub fn from_label(label: &str) -> Result<Self, LabelError> {
        let normalized = label
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '`')
            .to_lowercase();

        match normalized.as_str() {
            "" => Err(LabelError::Empty),
            "no" | "general" | "needs_general_response" => Ok(Category::General),
            "yes" | "specialist" | "needs_specialist_response" => Ok(Category::Specialist),
            "ok" | "data_lookup" | "needs_data_lookup_response" => Ok(Category::DataLookup),
            _ => Err(LabelError::Unrecognized(label.trim().to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpret the raw text returned by the classifier model.
///
/// Accepts a JSON object carrying the label (possibly fenced or wrapped in
/// prose) or a bare label.
pub fn parse_classification(raw: &str) -> Result<Category, LabelError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LabelError::Empty);
    }

    if let Some(json) = extract_json_object(raw) {
        let label = LABEL_FIELDS
            .iter()
            .find_map(|field| json.get(*field).and_then(|v| v.as_str()))
            .ok_or(LabelError::MissingField)?;
        return Category::from_label(label);
    }

    Category::from_label(raw)
}
