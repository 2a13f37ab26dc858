//! Use cases (application services)

pub mod classify;
pub mod expert_registry;
pub mod generate;
pub mod handle_turn;
pub mod memo;
pub mod route;
pub(crate) mod shared;
