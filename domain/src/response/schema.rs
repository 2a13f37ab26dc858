//! Explicit schema for expert output.
//!
//! The schema is checked imperatively against the raw completion text, so
//! it does not depend on any particular completion client.

use super::extract::extract_json_object;
use super::structured::StructuredResponse;
use serde_json::{Value, json};
use thiserror::Error;

pub const RESPONSE_FIELD: &str = "response";
pub const KEY_WORDS_FIELD: &str = "key_words";

/// Ways a completion can violate the response contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("output is not a JSON object")]
    NotJson,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` has the wrong type")]
    WrongType(&'static str),

    #[error("unexpected field `{0}`")]
    UnexpectedField(String),

    #[error("`response` is empty")]
    EmptyResponse,

    #[error("expected {min}-{max} key_words, found {found}")]
    KeyWordCount { found: usize, min: usize, max: usize },

    #[error("key_words[{0}] is empty")]
    EmptyKeyWord(usize),

    #[error("key_words[{index}] has {words} words (max {max})")]
    KeyWordTooLong { index: usize, words: usize, max: usize },
}

/// Field names, types and cardinality of a valid expert answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSchema {
    pub min_key_words: usize,
    pub max_key_words: usize,
    /// Upper bound on the number of whitespace-separated words per keyword.
    pub max_key_word_words: usize,
}

impl Default for ResponseSchema {
    fn default() -> Self {
        Self {
            min_key_words: 3,
            max_key_words: 4,
            max_key_word_words: 4,
        }
    }
}

impl ResponseSchema {
    /// Parse raw completion output and check it against the contract.
    pub fn validate(&self, raw: &str) -> Result<StructuredResponse, ContractViolation> {
        let value = extract_json_object(raw).ok_or(ContractViolation::NotJson)?;
        let Value::Object(map) = value else {
            return Err(ContractViolation::NotJson);
        };

        if let Some(extra) = map
            .keys()
            .find(|k| k.as_str() != RESPONSE_FIELD && k.as_str() != KEY_WORDS_FIELD)
        {
            return Err(ContractViolation::UnexpectedField(extra.clone()));
        }

        let response = map
            .get(RESPONSE_FIELD)
            .ok_or(ContractViolation::MissingField(RESPONSE_FIELD))?
            .as_str()
            .ok_or(ContractViolation::WrongType(RESPONSE_FIELD))?
            .to_string();

        let key_words = map
            .get(KEY_WORDS_FIELD)
            .ok_or(ContractViolation::MissingField(KEY_WORDS_FIELD))?
            .as_array()
            .ok_or(ContractViolation::WrongType(KEY_WORDS_FIELD))?
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or(ContractViolation::WrongType(KEY_WORDS_FIELD))?;

        let parsed = StructuredResponse { response, key_words };
        self.check(&parsed)?;
        Ok(parsed)
    }

    /// Check the value constraints of an already-typed response.
    pub fn check(&self, candidate: &StructuredResponse) -> Result<(), ContractViolation> {
        if candidate.response.trim().is_empty() {
            return Err(ContractViolation::EmptyResponse);
        }

        let found = candidate.key_words.len();
        if found < self.min_key_words || found > self.max_key_words {
            return Err(ContractViolation::KeyWordCount {
                found,
                min: self.min_key_words,
                max: self.max_key_words,
            });
        }

        for (index, key_word) in candidate.key_words.iter().enumerate() {
            let words = key_word.split_whitespace().count();
            if words == 0 {
                return Err(ContractViolation::EmptyKeyWord(index));
            }
            if words > self.max_key_word_words {
                return Err(ContractViolation::KeyWordTooLong {
                    index,
                    words,
                    max: self.max_key_word_words,
                });
            }
        }

        Ok(())
    }

    /// JSON Schema form of the contract.
    pub fn to_json_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                RESPONSE_FIELD: {
                    "type": "string",
                    "minLength": 1,
                    "description": "The main answer to the user"
                },
                KEY_WORDS_FIELD: {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": self.min_key_words,
                    "maxItems": self.max_key_words,
                    "description": format!(
                        "{}-{} short follow-up keywords or questions (at most {} words each) based on the conversation",
                        self.min_key_words, self.max_key_words, self.max_key_word_words
                    )
                }
            },
            "required": [RESPONSE_FIELD, KEY_WORDS_FIELD],
            "additionalProperties": false
        })
    }

    /// Text substituted for `{format_instructions}` in expert templates.
    pub fn format_instructions(&self) -> String {
        let schema = serde_json::to_string_pretty(&self.to_json_schema())
            .unwrap_or_else(|_| self.to_json_schema().to_string());
        format!(
            "The output must be a single JSON object that conforms to the JSON schema below, \
with no other text before or after it.\n```json\n{schema}\n```"
        )
    }
}
