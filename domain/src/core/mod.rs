//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: completion models the experts and classifier can use
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
