//! Bedrock model ID mapping
//!
//! Maps domain `Model` variants to Bedrock model identifiers,
//! with optional cross-region inference prefix.

use concierge_domain::Model;

/// Convert a domain Model to a Bedrock model ID string.
///
/// - Models that require inference profiles (Claude 4.5) always use the
///   region-group prefix (`us.`, `eu.`, etc.) regardless of `cross_region`.
/// - When `cross_region` is true, other models get the region-group prefix too.
/// - Custom models are passed through unchanged.
pub fn to_bedrock_model_id(model: &Model, cross_region: bool, region: &str) -> String {
    let base_id = match model {
        Model::ClaudeSonnet35 => "anthropic.claude-3-5-sonnet-20240620-v1:0",
        Model::ClaudeHaiku35 => "anthropic.claude-3-5-haiku-20241022-v1:0",
        Model::ClaudeSonnet4 => "anthropic.claude-sonnet-4-20250514-v1:0",
        Model::ClaudeSonnet45 => "anthropic.claude-sonnet-4-5-20250929-v1:0",
        Model::ClaudeHaiku45 => "anthropic.claude-haiku-4-5-20251001-v1:0",
        Model::Custom(id) => return id.clone(),
    };

    if cross_region || requires_inference_profile(model) {
        let prefix = inference_profile_prefix(region);
        format!("{prefix}.{base_id}")
    } else {
        base_id.to_string()
    }
}

/// Whether a model requires an inference profile (cannot use on-demand throughput).
fn requires_inference_profile(model: &Model) -> bool {
    matches!(model, Model::ClaudeSonnet45 | Model::ClaudeHaiku45)
}

/// Derive the inference profile region group from an AWS region string.
///
/// `us-east-1` → `us`, `eu-west-3` → `eu`, `ap-northeast-1` → `apac`.
fn inference_profile_prefix(region: &str) -> &'static str {
    match region.split('-').next() {
        Some("eu") => "eu",
        Some("ap") => "apac",
        _ => "us",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_mapping() {
        let id = to_bedrock_model_id(&Model::ClaudeSonnet35, false, "eu-west-3");
        assert_eq!(id, "anthropic.claude-3-5-sonnet-20240620-v1:0");
    }

    #[test]
    fn test_claude_sonnet4_mapping() {
        let id = to_bedrock_model_id(&Model::ClaudeSonnet4, false, "us-east-1");
        assert_eq!(id, "anthropic.claude-sonnet-4-20250514-v1:0");
    }

    #[test]
    fn test_claude45_uses_inference_profile() {
        let id = to_bedrock_model_id(&Model::ClaudeSonnet45, false, "us-east-1");
        assert_eq!(id, "us.anthropic.claude-sonnet-4-5-20250929-v1:0");

        let id = to_bedrock_model_id(&Model::ClaudeHaiku45, false, "eu-central-1");
        assert_eq!(id, "eu.anthropic.claude-haiku-4-5-20251001-v1:0");
    }

    #[test]
    fn test_cross_region_prefix() {
        let id = to_bedrock_model_id(&Model::ClaudeSonnet35, true, "eu-west-3");
        assert_eq!(id, "eu.anthropic.claude-3-5-sonnet-20240620-v1:0");

        let id = to_bedrock_model_id(&Model::ClaudeHaiku35, true, "ap-northeast-1");
        assert_eq!(id, "apac.anthropic.claude-3-5-haiku-20241022-v1:0");
    }

    #[test]
    fn test_custom_model_passthrough() {
        let model = Model::Custom("arn:aws:bedrock:my-profile".to_string());
        assert_eq!(
            to_bedrock_model_id(&model, true, "us-west-2"),
            "arn:aws:bedrock:my-profile"
        );
    }
}
