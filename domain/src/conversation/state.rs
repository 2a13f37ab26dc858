//! Per-turn processing states.
//!
//! ```text
//! Received → Classified → Routed → Generating → Succeeded
//!                                             ↘ Failed
//! ```
//!
//! A turn passes through each state at most once. `Failed` may also be
//! entered from `Routed` when the selected expert cannot be loaded.

use crate::routing::category::Category;
use crate::routing::expert::ExpertKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    Received,
    Classified(Category),
    Routed(ExpertKind),
    Generating,
    Succeeded,
    Failed,
}

impl TurnState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::Succeeded | TurnState::Failed)
    }

    /// Short label for progress displays and logs.
    pub fn label(&self) -> &'static str {
        match self {
            TurnState::Received => "received",
            TurnState::Classified(_) => "classified",
            TurnState::Routed(_) => "routed",
            TurnState::Generating => "generating",
            TurnState::Succeeded => "succeeded",
            TurnState::Failed => "failed",
        }
    }
}
