//! Output formatter trait

use crate::cli::commands::OutputFormat;
use concierge_application::{TurnError, TurnOutcome};

/// Shown when the expert could not produce a valid answer.
pub const RETRY_MESSAGE: &str = "Could not generate a response, please retry.";

/// Trait for rendering turn results
pub trait OutputFormatter {
    /// Format a successful turn
    fn format_outcome(&self, outcome: &TurnOutcome) -> String;

    /// Format a failed turn
    fn format_error(&self, error: &TurnError) -> String;
}

/// Formatter for the selected output format.
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter + Send + Sync> {
    match format {
        OutputFormat::Text => Box::new(super::console::ConsoleFormatter),
        OutputFormat::Json => Box::new(super::json::JsonFormatter),
    }
}

/// User-facing explanation of a failed turn.
///
/// Generation failures get the generic retry message; configuration
/// failures name the affected expert so the operator knows what to fix.
pub fn failure_message(error: &TurnError) -> String {
    match error {
        TurnError::EmptyInput => "Please enter a question.".to_string(),
        TurnError::Generation { .. } => RETRY_MESSAGE.to_string(),
        TurnError::Configuration { expert, source } => {
            format!("The {} is unavailable: {source}", expert.display_name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_application::{ConfigurationError, GatewayError, GenerationError};
    use concierge_domain::ExpertKind;

    #[test]
    fn test_generation_failure_asks_to_retry() {
        let error = TurnError::Generation {
            expert: ExpertKind::Domain,
            source: GenerationError::Gateway(GatewayError::Timeout),
        };
        assert_eq!(failure_message(&error), RETRY_MESSAGE);
    }

    #[test]
    fn test_configuration_failure_names_expert() {
        let error = TurnError::Configuration {
            expert: ExpertKind::DataLookup,
            source: ConfigurationError::NotConfigured(ExpertKind::DataLookup),
        };
        assert!(failure_message(&error).contains("Data Lookup Expert"));
    }
}
