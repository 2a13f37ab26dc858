//! Presentation layer for ev-concierge
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, RETRY_MESSAGE, failure_message, formatter_for};
pub use output::json::JsonFormatter;
pub use progress::reporter::ProgressReporter;
