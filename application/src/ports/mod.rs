//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod diagnostic_sink;
pub mod knowledge_loader;
pub mod llm_gateway;
pub mod turn_progress;
