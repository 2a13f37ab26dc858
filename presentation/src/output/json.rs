//! JSON output formatter

use super::formatter::{OutputFormatter, failure_message};
use concierge_application::{TurnError, TurnOutcome};
use serde_json::json;

/// Formats answers as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_outcome(&self, outcome: &TurnOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_error(&self, error: &TurnError) -> String {
        let value = json!({
            "error": failure_message(error),
            "detail": error.to_string(),
            "expert": error.expert(),
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_application::{GatewayError, GenerationError};
    use concierge_domain::{Category, ExpertKind, StructuredResponse};
    use serde_json::Value;

    #[test]
    fn test_outcome_json_is_flat() {
        let outcome = TurnOutcome {
            category: Category::General,
            expert: ExpertKind::General,
            response: StructuredResponse::new(
                "Bonjour !",
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ),
            elapsed_ms: 10,
        };
        let value: Value = serde_json::from_str(&JsonFormatter.format_outcome(&outcome)).unwrap();
        assert_eq!(value["response"], "Bonjour !");
        assert_eq!(value["key_words"].as_array().unwrap().len(), 3);
        assert!(value.get("expert").is_some());
        assert!(value.get("category").is_some());
    }

    #[test]
    fn test_error_json() {
        let error = TurnError::Generation {
            expert: ExpertKind::Domain,
            source: GenerationError::Gateway(GatewayError::RateLimited("slow down".to_string())),
        };
        let value: Value = serde_json::from_str(&JsonFormatter.format_error(&error)).unwrap();
        assert_eq!(value["error"], "Could not generate a response, please retry.");
        assert!(value["detail"].as_str().unwrap().contains("domain"));
    }
}
