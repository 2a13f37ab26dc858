//! Prompt domain
//!
//! Instruction templates with named placeholders, and the built-in
//! defaults used when configuration does not supply its own text.

pub mod defaults;
mod template;

pub use template::{Placeholder, PromptTemplate, PromptVars, TemplateError};
