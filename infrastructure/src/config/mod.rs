//! Configuration file loading for ev-concierge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CONCIERGE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./concierge.toml` or `./.concierge.toml`
//! 4. Global: `<config dir>/ev-concierge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnthropicConfig, FileBedrockConfig, FileBehaviorConfig,
    FileClassifierConfig, FileConfig, FileContractConfig, FileExpertConfig, FileExpertsConfig,
    FileLoggingConfig, FileModelsConfig, FileProvidersConfig, FileResourcesConfig,
};
pub use loader::ConfigLoader;
