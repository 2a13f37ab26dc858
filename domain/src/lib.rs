//! Domain layer for ev-concierge
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Turn
//!
//! One user utterance and the assistant answer to it. A turn is classified
//! into a [`Category`], routed to an [`ExpertKind`], and answered with a
//! [`StructuredResponse`] that satisfies the [`ResponseSchema`].
//!
//! ## History
//!
//! The [`ConversationHistory`] is append-only: an exchange is committed
//! only once its answer has been validated.

pub mod conversation;
pub mod core;
pub mod prompt;
pub mod providers;
pub mod response;
pub mod routing;
pub mod util;

// Re-export commonly used types
pub use conversation::{
    entities::{Role, Turn, UserInput},
    history::{ConversationHistory, EMPTY_HISTORY},
    state::TurnState,
};
pub use core::{error::DomainError, model::Model};
pub use prompt::{Placeholder, PromptTemplate, PromptVars, TemplateError};
pub use providers::{AnthropicProviderConfig, BedrockProviderConfig, ProviderConfig};
pub use response::{
    extract::extract_json_object,
    schema::{ContractViolation, ResponseSchema},
    structured::StructuredResponse,
};
pub use routing::{
    category::{Category, LabelError, parse_classification},
    expert::ExpertKind,
    router::select_expert,
};
