//! Application layer for ev-concierge
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ClassifierSpec, ExpertSpec, TextSource, TurnParams};
pub use ports::{
    diagnostic_sink::{DiagnosticRecord, DiagnosticSink, NoDiagnosticSink},
    knowledge_loader::{KnowledgeError, KnowledgeLoader, NoKnowledge},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    turn_progress::{NoTurnProgress, TurnProgressNotifier},
};
pub use use_cases::classify::{CLASSIFIER_PLACEHOLDERS, ClassificationFailure, Classifier};
pub use use_cases::expert_registry::{
    ConfigurationError, EXPERT_PLACEHOLDERS, ExpertProfile, ExpertRegistry,
};
pub use use_cases::generate::{ExpertGenerator, ExpertRequest, GenerationError};
pub use use_cases::handle_turn::{HandleTurnUseCase, TurnError, TurnOutcome};
pub use use_cases::memo::Memo;
pub use use_cases::route::ExpertRouter;
