//! Knowledge and instruction file loading.

mod file_loader;

pub use file_loader::FileKnowledgeLoader;
