//! Append-only conversation history for one session.

use super::entities::{Turn, UserInput};
use crate::util::content_hash;
use serde::Serialize;

/// Rendered in place of the history when a session has no turns yet.
pub const EMPTY_HISTORY: &str = "No conversation history.";

/// Ordered log of the turns of one session.
///
/// Created empty, only ever grows, and is dropped with the session.
/// There is no removal or edit API; the only mutation is
/// [`commit_exchange`](Self::commit_exchange), which appends a completed
/// user/assistant pair in one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Append the user turn and the assistant turn that answered it.
    pub fn commit_exchange(&mut self, input: &UserInput, answer: impl Into<String>) {
        self.turns.push(Turn::user(input.as_str()));
        self.turns.push(Turn::assistant(answer));
    }

    /// Serialize the history for inclusion in a prompt.
    ///
    /// `window` limits the output to the most recent N turns.
    pub fn render(&self, window: Option<usize>) -> String {
        if self.turns.is_empty() {
            return EMPTY_HISTORY.to_string();
        }

        let skip = window
            .map(|w| self.turns.len().saturating_sub(w))
            .unwrap_or(0);

        self.turns[skip..]
            .iter()
            .map(|t| format!("{}: {}", t.role(), t.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Identifies the current state of the history.
    ///
    /// Two histories with the same turns have the same fingerprint; any
    /// append changes it.
    pub fn fingerprint(&self) -> u64 {
        content_hash(&self.turns)
    }
}
