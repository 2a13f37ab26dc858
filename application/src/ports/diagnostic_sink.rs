//! Port for diagnostic records.
//!
//! Defines the [`DiagnosticSink`] trait for persisting the assembled
//! instructions, context and input of a successful expert call.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable messages, while this port captures full prompts in a
//! machine-readable format (JSONL).

use serde_json::Value;

/// A structured diagnostic record.
pub struct DiagnosticRecord {
    /// Record type identifier (e.g., "expert_prompt").
    pub record_type: &'static str,
    /// JSON payload with record-specific data.
    pub payload: Value,
}

impl DiagnosticRecord {
    pub fn new(record_type: &'static str, payload: Value) -> Self {
        Self {
            record_type,
            payload,
        }
    }
}

/// Port for recording diagnostics.
///
/// `record` is synchronous and infallible: sink failures are swallowed by
/// the adapter and never reach the turn.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, record: DiagnosticRecord);
}

/// No-op implementation for tests and when diagnostics are disabled.
pub struct NoDiagnosticSink;

impl DiagnosticSink for NoDiagnosticSink {
    fn record(&self, _record: DiagnosticRecord) {}
}
