//! Structured response contract.
//!
//! Every expert must answer with a JSON object holding a `response` string
//! and a short list of follow-up `key_words`. [`schema::ResponseSchema`]
//! describes the contract and checks raw model output against it.

pub mod extract;
pub mod schema;
pub mod structured;
