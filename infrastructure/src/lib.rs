//! Infrastructure layer for ev-concierge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod knowledge;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use knowledge::FileKnowledgeLoader;
pub use logging::JsonlDiagnosticSink;
pub use providers::routing::RoutingGateway;
pub use providers::{ProviderAdapter, ProviderKind};

#[cfg(feature = "anthropic")]
pub use providers::anthropic::AnthropicProviderAdapter;

#[cfg(feature = "bedrock")]
pub use providers::bedrock::BedrockProviderAdapter;
