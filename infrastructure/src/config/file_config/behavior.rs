//! Runtime behavior, response contract, resources and logging sections

use concierge_application::TurnParams;
use concierge_domain::ResponseSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// `[behavior]`: deadlines, history and memoization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Deadline per completion call, in seconds. Unset means no deadline.
    pub timeout_seconds: Option<u64>,
    /// Number of most recent turns rendered into prompts. Unset means all.
    pub history_window: Option<usize>,
    /// Memo entry lifetime in seconds. Unset or 0 disables memoization.
    pub memo_ttl_seconds: Option<u64>,
    /// Maximum entries per memo.
    pub memo_capacity: usize,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: Some(60),
            history_window: None,
            memo_ttl_seconds: None,
            memo_capacity: 128,
        }
    }
}

impl FileBehaviorConfig {
    pub fn to_turn_params(&self) -> TurnParams {
        let params = TurnParams::default()
            .with_timeout(self.timeout_seconds.map(Duration::from_secs))
            .with_history_window(self.history_window);
        match self.memo_ttl_seconds {
            Some(ttl) => params.with_memo(Duration::from_secs(ttl), self.memo_capacity),
            None => params,
        }
    }
}

/// `[contract]`: keyword cardinality of expert answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContractConfig {
    pub min_key_words: usize,
    pub max_key_words: usize,
    /// Maximum words inside one keyword.
    pub max_key_word_words: usize,
}

impl Default for FileContractConfig {
    fn default() -> Self {
        let schema = ResponseSchema::default();
        Self {
            min_key_words: schema.min_key_words,
            max_key_words: schema.max_key_words,
            max_key_word_words: schema.max_key_word_words,
        }
    }
}

impl FileContractConfig {
    pub fn to_schema(&self) -> ResponseSchema {
        ResponseSchema {
            min_key_words: self.min_key_words,
            max_key_words: self.max_key_words,
            max_key_word_words: self.max_key_word_words,
        }
    }
}

/// `[resources]`: where knowledge and `file:` prompts are read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResourcesConfig {
    /// Base directory for relative identifiers (default: current directory).
    pub base_dir: Option<PathBuf>,
}

impl FileResourcesConfig {
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// `[logging]`: diagnostic records and log files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving expert prompt records. Unset disables them.
    pub diagnostics: Option<PathBuf>,
    /// Directory for daily rotated tracing logs. Unset logs to stderr only.
    pub directory: Option<PathBuf>,
}
