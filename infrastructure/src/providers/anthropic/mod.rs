//! Anthropic Messages API provider
//!
//! Talks to `POST {base_url}/v1/messages` with an API key.

mod adapter;
mod session;
mod types;

pub use adapter::AnthropicProviderAdapter;
