//! Answer and error rendering.

pub mod console;
pub mod formatter;
pub mod json;
