//! Provider configuration from TOML (`[providers]` section)

use concierge_domain::{AnthropicProviderConfig, BedrockProviderConfig, ProviderConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBedrockConfig {
    /// AWS region for Bedrock models (default: "us-east-1")
    pub region: String,
    /// AWS profile name for credentials
    pub profile: Option<String>,
    /// Max tokens per response (default: 4096)
    pub max_tokens: u32,
    /// Use cross-region inference profiles
    pub cross_region: Option<bool>,
}

impl Default for FileBedrockConfig {
    fn default() -> Self {
        let defaults = BedrockProviderConfig::default();
        Self {
            region: defaults.region,
            profile: defaults.profile,
            max_tokens: defaults.max_tokens,
            cross_region: defaults.cross_region,
        }
    }
}

/// Anthropic API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        let defaults = AnthropicProviderConfig::default();
        Self {
            api_key_env: defaults.api_key_env,
            api_key: defaults.api_key,
            base_url: defaults.base_url,
            max_tokens: defaults.max_tokens,
            api_version: defaults.api_version,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Default provider: "anthropic" or "bedrock".
    pub default: Option<String>,
    /// Explicit model → provider routing overrides.
    pub routing: HashMap<String, String>,
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
    /// AWS Bedrock settings.
    pub bedrock: FileBedrockConfig,
}

impl FileProvidersConfig {
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            default: self.default.clone(),
            routing: self.routing.clone(),
            bedrock: BedrockProviderConfig {
                region: self.bedrock.region.clone(),
                profile: self.bedrock.profile.clone(),
                max_tokens: self.bedrock.max_tokens,
                cross_region: self.bedrock.cross_region,
            },
            anthropic: AnthropicProviderConfig {
                api_key_env: self.anthropic.api_key_env.clone(),
                api_key: self.anthropic.api_key.clone(),
                base_url: self.anthropic.base_url.clone(),
                max_tokens: self.anthropic.max_tokens,
                api_version: self.anthropic.api_version.clone(),
            },
        }
    }
}
