//! Conversation domain.
//!
//! - [`entities::Turn`]: one immutable entry (role + content) in a session
//! - [`entities::UserInput`]: a validated user utterance
//! - [`history::ConversationHistory`]: the append-only log of a session
//! - [`state::TurnState`]: the per-turn processing state machine

pub mod entities;
pub mod history;
pub mod state;
