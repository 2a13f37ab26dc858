//! Structured diagnostic logging.
//!
//! - [`JsonlDiagnosticSink`]: JSONL file writer implementing `DiagnosticSink`

mod jsonl_sink;

pub use jsonl_sink::JsonlDiagnosticSink;
