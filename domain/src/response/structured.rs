//! The validated expert answer.

use serde::{Deserialize, Serialize};

/// An expert's answer after it passed the response contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredResponse {
    /// The answer shown to the user.
    pub response: String,
    /// Follow-up suggestions, phrased from the user's point of view.
    pub key_words: Vec<String>,
}

impl StructuredResponse {
    pub fn new(response: impl Into<String>, key_words: Vec<String>) -> Self {
        Self {
            response: response.into(),
            key_words,
        }
    }
}
