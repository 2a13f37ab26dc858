//! Routing domain: which expert answers a turn.
//!
//! - [`category::Category`]: the classification of a turn
//! - [`expert::ExpertKind`]: the available experts
//! - [`router::select_expert`]: the category → expert table

pub mod category;
pub mod expert;
pub mod router;
