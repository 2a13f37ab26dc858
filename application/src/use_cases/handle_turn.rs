//! Handle Turn use case.
//!
//! Drives one user turn through the state machine:
//!
//! ```text
//! Received → Classified → Routed → Generating → Succeeded
//!                                             ↘ Failed
//! ```
//!
//! Classification failures are absorbed by the [`Classifier`]; generation
//! and configuration failures end the turn. The user turn and the assistant
//! turn are committed to the history together, and only on success.

use crate::ports::turn_progress::TurnProgressNotifier;
use crate::use_cases::classify::Classifier;
use crate::use_cases::expert_registry::ConfigurationError;
use crate::use_cases::generate::GenerationError;
use crate::use_cases::route::ExpertRouter;
use concierge_domain::util::truncate_str;
use concierge_domain::{
    Category, ConversationHistory, ExpertKind, StructuredResponse, TurnState, UserInput,
};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that end a turn without an answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    #[error("input is empty")]
    EmptyInput,

    #[error("{expert} expert is unavailable: {source}")]
    Configuration {
        expert: ExpertKind,
        #[source]
        source: ConfigurationError,
    },

    #[error("{expert} expert could not generate a response: {source}")]
    Generation {
        expert: ExpertKind,
        #[source]
        source: GenerationError,
    },
}

impl TurnError {
    /// The expert the turn was routed to, if it got that far.
    pub fn expert(&self) -> Option<ExpertKind> {
        match self {
            TurnError::EmptyInput => None,
            TurnError::Configuration { expert, .. } | TurnError::Generation { expert, .. } => {
                Some(*expert)
            }
        }
    }
}

/// A successfully answered turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub category: Category,
    pub expert: ExpertKind,
    #[serde(flatten)]
    pub response: StructuredResponse,
    pub elapsed_ms: u64,
}

pub struct HandleTurnUseCase {
    classifier: Classifier,
    router: ExpertRouter,
}

impl HandleTurnUseCase {
    pub fn new(classifier: Classifier, router: ExpertRouter) -> Self {
        Self { classifier, router }
    }

    pub fn router(&self) -> &ExpertRouter {
        &self.router
    }

    /// Process one turn against `history`.
    ///
    /// On success `history` grows by exactly two turns (user, assistant);
    /// on failure it is left untouched.
    pub async fn execute(
        &self,
        history: &mut ConversationHistory,
        input: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<TurnOutcome, TurnError> {
        let input = UserInput::try_new(input).ok_or(TurnError::EmptyInput)?;
        let started = Instant::now();
        info!("Handling turn: {}", truncate_str(input.as_str(), 100));
        progress.on_state(&TurnState::Received);

        let category = self.classifier.classify(&input, history).await;
        progress.on_state(&TurnState::Classified(category));

        let expert = self.router.select(category);
        progress.on_state(&TurnState::Routed(expert));

        let profile = match self.router.profile(expert).await {
            Ok(profile) => profile,
            Err(source) => {
                warn!(%expert, error = %source, "Expert unavailable");
                progress.on_state(&TurnState::Failed);
                return Err(TurnError::Configuration { expert, source });
            }
        };

        progress.on_state(&TurnState::Generating);
        let response = match self.router.respond(&profile, history, &input).await {
            Ok(response) => response,
            Err(source) => {
                progress.on_state(&TurnState::Failed);
                return Err(TurnError::Generation { expert, source });
            }
        };

        history.commit_exchange(&input, response.response.clone());
        progress.on_state(&TurnState::Succeeded);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(%category, %expert, elapsed_ms, "Turn succeeded");
        Ok(TurnOutcome {
            category,
            expert,
            response,
            elapsed_ms,
        })
    }
}
