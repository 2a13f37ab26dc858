//! Knowledge loader port
//!
//! Supplies opaque text resources (knowledge blobs, instruction files) by
//! identifier. The storage medium is up to the adapter.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("failed to read {identifier}: {reason}")]
    Unreadable { identifier: String, reason: String },
}

impl KnowledgeError {
    pub fn identifier(&self) -> &str {
        match self {
            KnowledgeError::NotFound(id) => id,
            KnowledgeError::Unreadable { identifier, .. } => identifier,
        }
    }
}

/// Loads a text resource by identifier.
pub trait KnowledgeLoader: Send + Sync {
    fn load(&self, identifier: &str) -> Result<String, KnowledgeError>;
}

/// Loader with no resources; every lookup is `NotFound`.
pub struct NoKnowledge;

impl KnowledgeLoader for NoKnowledge {
    fn load(&self, identifier: &str) -> Result<String, KnowledgeError> {
        Err(KnowledgeError::NotFound(identifier.to_string()))
    }
}
