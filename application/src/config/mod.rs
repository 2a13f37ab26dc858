//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`TurnParams`]: per-turn runtime behavior (timeouts, history window, memoization)
//! - [`ExpertSpec`] / [`ClassifierSpec`]: where each component's instructions come from

pub mod expert_spec;
pub mod turn_params;

pub use expert_spec::{ClassifierSpec, ExpertSpec, TextSource};
pub use turn_params::TurnParams;
