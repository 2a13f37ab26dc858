//! Local file system knowledge loader
//!
//! [`FileKnowledgeLoader`] implements [`KnowledgeLoader`] by reading UTF-8
//! files. Relative identifiers are resolved against a base directory
//! (`[resources] base_dir`, default: the working directory); absolute
//! identifiers are used as-is.

use concierge_application::ports::knowledge_loader::{KnowledgeError, KnowledgeLoader};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct FileKnowledgeLoader {
    base_dir: PathBuf,
}

impl FileKnowledgeLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The file an identifier refers to.
    pub fn resolve(&self, identifier: &str) -> PathBuf {
        let path = Path::new(identifier);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl KnowledgeLoader for FileKnowledgeLoader {
    fn load(&self, identifier: &str) -> Result<String, KnowledgeError> {
        if identifier.trim().is_empty() {
            return Err(KnowledgeError::NotFound(identifier.to_string()));
        }

        let path = self.resolve(identifier);
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), bytes = text.len(), "Loaded resource");
                Ok(text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(KnowledgeError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(KnowledgeError::Unreadable {
                identifier: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
