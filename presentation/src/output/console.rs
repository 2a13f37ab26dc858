//! Console output formatter for answers

use super::formatter::{OutputFormatter, failure_message};
use colored::Colorize;
use concierge_application::{TurnError, TurnOutcome};

/// Formats answers for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Answer text, then the suggestions numbered from 1.
    pub fn format(outcome: &TurnOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!("── {} ──", outcome.expert.display_name()).dimmed()
        ));
        output.push_str(outcome.response.response.trim());
        output.push('\n');

        if !outcome.response.key_words.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".cyan().bold()));
            for (i, keyword) in outcome.response.key_words.iter().enumerate() {
                output.push_str(&format!("  {} {}\n", format!("[{}]", i + 1).yellow(), keyword));
            }
        }

        output
    }

    pub fn format_error(error: &TurnError) -> String {
        format!("{} {}", "Error:".red().bold(), failure_message(error))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_outcome(&self, outcome: &TurnOutcome) -> String {
        Self::format(outcome)
    }

    fn format_error(&self, error: &TurnError) -> String {
        Self::format_error(error)
    }
}
