//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface over one
//! conversation session.

mod repl;

pub use repl::ChatRepl;
